use larder_core::Confirm;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};

/// Asks on the terminal. Anything but "y"/"yes" is a no, and so is EOF.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        ask_yes_no(&mut io::stdin().lock(), &mut io::stdout(), message).unwrap_or(false)
    }
}

/// Asks on a borrowed input/output pair, for flows that already hold stdin.
pub struct LineConfirm<'a, R, W> {
    io: RefCell<(&'a mut R, &'a mut W)>,
}

impl<'a, R: BufRead, W: Write> LineConfirm<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            io: RefCell::new((input, output)),
        }
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<'_, R, W> {
    fn confirm(&self, message: &str) -> bool {
        let mut io = self.io.borrow_mut();
        let (input, output) = &mut *io;
        ask_yes_no(&mut **input, &mut **output, message).unwrap_or(false)
    }
}

pub fn ask_yes_no(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
) -> io::Result<bool> {
    Ok(ask_line(input, output, &format!("{message} [y/N]"))?
        .map(|answer| is_yes(&answer))
        .unwrap_or(false))
}

/// Print `label` and read one line without its newline. `None` at end of input.
pub fn ask_line(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label} ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_yes_answers() {
        for answer in ["y\n", "YES\n", " yes \r\n"] {
            let mut out = Vec::new();
            assert!(ask_yes_no(&mut Cursor::new(answer), &mut out, "Sure?").unwrap());
            assert_eq!(String::from_utf8(out).unwrap(), "Sure? [y/N] ");
        }
    }

    #[test]
    fn test_everything_else_is_no() {
        for answer in ["\n", "n\n", "yep\n", ""] {
            let mut out = Vec::new();
            assert!(!ask_yes_no(&mut Cursor::new(answer), &mut out, "Sure?").unwrap());
        }
    }

    #[test]
    fn test_line_confirm() {
        let mut input = Cursor::new("y\nn\n");
        let mut out = Vec::new();
        let confirm = LineConfirm::new(&mut input, &mut out);
        assert!(confirm.confirm("Leave?"));
        assert!(!confirm.confirm("Leave?"));
    }

    #[test]
    fn test_ask_line_strips_newline() {
        let mut input = Cursor::new("Tea\nsecond\n");
        let mut out = Vec::new();
        assert_eq!(
            ask_line(&mut input, &mut out, "Name:").unwrap().as_deref(),
            Some("Tea")
        );
        assert_eq!(
            ask_line(&mut input, &mut out, "Next:").unwrap().as_deref(),
            Some("second")
        );
        assert_eq!(ask_line(&mut input, &mut out, "Done:").unwrap(), None);
    }
}
