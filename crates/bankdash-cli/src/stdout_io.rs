use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_tolerating_closed_pipe(&mut stdout, text.as_bytes())
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    let mut line = String::with_capacity(text.len() + 1);
    line.push_str(text);
    line.push('\n');
    write_tolerating_closed_pipe(&mut stdout, line.as_bytes())
}

/// `bankdash history | head` closes the pipe early; that is not a failure.
fn write_tolerating_closed_pipe(writer: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    let written = writer.write_all(bytes).and_then(|()| writer.flush());
    match written {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::write_tolerating_closed_pipe;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Full;

    impl Write for Full {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::StorageFull))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn broken_pipe_is_ignored() {
        assert!(write_tolerating_closed_pipe(&mut ClosedPipe, b"rows").is_ok());
    }

    #[test]
    fn other_write_errors_surface() {
        assert!(write_tolerating_closed_pipe(&mut Full, b"rows").is_err());
    }

    #[test]
    fn bytes_reach_the_writer() {
        let mut buffer = Vec::new();
        assert!(write_tolerating_closed_pipe(&mut buffer, b"ok").is_ok());
        assert_eq!(buffer, b"ok");
    }
}
