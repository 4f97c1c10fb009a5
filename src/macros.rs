// Convenience for writing to stderr thanks to https://github.com/BurntSushi
#[macro_export]
macro_rules! wlnerr(
    ($($arg:tt)*) => ({
        use std::io::{Write, stderr};
        writeln!(&mut stderr(), $($arg)*).ok();
    })
);
