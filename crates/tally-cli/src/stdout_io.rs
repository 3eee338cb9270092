use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_tolerating_closed_pipe(&mut io::stdout().lock(), text, false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_tolerating_closed_pipe(&mut io::stdout().lock(), text, true)
}

/// Writes `text` and flushes, treating a closed reader (`| head`) as success.
fn write_tolerating_closed_pipe(
    writer: &mut dyn Write,
    text: &str,
    trailing_newline: bool,
) -> io::Result<()> {
    let result = writer
        .write_all(text.as_bytes())
        .and_then(|()| {
            if trailing_newline {
                writer.write_all(b"\n")
            } else {
                Ok(())
            }
        })
        .and_then(|()| writer.flush());

    match result {
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
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn appends_newline_when_requested() {
        let mut buffer = Vec::new();
        let result = write_tolerating_closed_pipe(&mut buffer, "rows", true);
        assert!(result.is_ok());
        assert_eq!(buffer, b"rows\n");
    }

    #[test]
    fn closed_pipe_is_not_an_error() {
        let result = write_tolerating_closed_pipe(&mut ClosedPipe, "rows", true);
        assert!(result.is_ok());
    }
}
