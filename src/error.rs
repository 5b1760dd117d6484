use anyhow::Error;

use crate::SessionError;

/// Adds methods for failing without panic. Like `expect` but without panic.
pub trait NiceError<T, E> {
    /// Fail exiting with `1` if the value is not present. Otherwise return the content.
    fn nice_unwrap(self) -> T;
}

/// Print the error to stderr. A [`SessionError`] is shown as its dialog, if it has one: it
/// has already been reported on the status line.
fn print_error(error: Error) {
    debug!("{:?}", error);
    if let Some(session_error) = error.downcast_ref::<SessionError>() {
        if let Some(diagnostic) = session_error.diagnostic() {
            diagnostic.emit();
        }
        return;
    }
    let mut fail: &dyn std::error::Error = error.as_ref();
    eprintln!("Error: {fail}");
    while let Some(cause) = fail.source() {
        eprintln!("\nCaused by:\n    {cause}");
        fail = cause;
    }
}

impl<T> NiceError<T, Error> for Result<T, Error> {
    fn nice_unwrap(self) -> T {
        match self {
            Ok(x) => x,
            Err(e) => {
                print_error(e);
                std::process::exit(1);
            }
        }
    }
}
