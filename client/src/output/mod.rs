//! Console output and interactive prompts

use std::io::{self, BufRead, Write};

/// Where handlers report events and ask the user for input
pub trait Console {
    fn line(&mut self, text: &str);

    /// Shows `question` and blocks until a line of input is available
    fn prompt(&mut self, question: &str) -> io::Result<String>;
}

/// Console on stdin/stdout
pub struct StdConsole {
    timestamps: bool,
}

impl StdConsole {
    pub fn new(timestamps: bool) -> Self {
        Self { timestamps }
    }
}

impl Console for StdConsole {
    fn line(&mut self, text: &str) {
        println!("{}", decorate(self.timestamps, text));
    }

    fn prompt(&mut self, question: &str) -> io::Result<String> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", decorate(self.timestamps, question))?;
            stdout.flush()?;
        }
        read_answer(&mut io::stdin().lock())
    }
}

fn decorate(timestamps: bool, text: &str) -> String {
    if timestamps {
        format!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), text)
    } else {
        text.to_string()
    }
}

/// Reads one line without its line terminator
fn read_answer<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "console input closed",
        ));
    }
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}
