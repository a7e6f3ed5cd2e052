use std::io::{self, Write};

/// Writes to stdout, treating a closed pipe as success so that piping
/// into `head` or a pager never surfaces an error to the user.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    swallow_broken_pipe(stdout.write_all(text.as_bytes()))?;
    swallow_broken_pipe(stdout.flush())
}

fn swallow_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
