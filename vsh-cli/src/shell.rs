// SPDX-License-Identifier: AGPL-3.0-or-later
//! Command parsing and the interactive loop

use console::style;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use vsh_vfs::Vfs;

/// The fixed set of shell commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ls(String),
    Cd(String),
    Mv { source: String, dest: String },
    Tree(Option<String>),
    Uname,
    Exit,
}

/// A line that does not form a runnable command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("")]
    Empty,

    #[error("cd: missing operand")]
    MissingDirectory,

    #[error("mv: missing file operand")]
    MissingFileOperand,

    #[error("{0}: command not found")]
    Unknown(String),
}

impl Command {
    /// Split on whitespace and map the first word onto a command. Extra
    /// operands to `ls`, `cd` and `tree` are ignored.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ParseError::Empty)?;
        let args: Vec<&str> = words.collect();

        match name {
            "ls" => Ok(Command::Ls(args.first().unwrap_or(&".").to_string())),
            "cd" => args
                .first()
                .map(|path| Command::Cd(path.to_string()))
                .ok_or(ParseError::MissingDirectory),
            "mv" => match args.as_slice() {
                [source, dest] => Ok(Command::Mv {
                    source: source.to_string(),
                    dest: dest.to_string(),
                }),
                _ => Err(ParseError::MissingFileOperand),
            },
            "tree" => Ok(Command::Tree(args.first().map(|p| p.to_string()))),
            "uname" => Ok(Command::Uname),
            "exit" => Ok(Command::Exit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

/// Drives a [`Vfs`] from text commands
pub struct Shell {
    vfs: Vfs,
    running: bool,
    color: bool,
}

impl Shell {
    pub fn new(vfs: Vfs) -> Self {
        Self {
            vfs,
            running: true,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn vfs_mut(&mut self) -> &mut Vfs {
        &mut self.vfs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn prompt(&self) -> String {
        let cwd = self.vfs.current_path().to_path_string();
        if self.color {
            format!("{}$ ", style(cwd).blue().bold().force_styling(true))
        } else {
            format!("{cwd}$ ")
        }
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<()> {
        tracing::debug!(?command, "execute");
        match command {
            Command::Ls(path) => match self.vfs.list(&path) {
                Ok(names) if names.is_empty() => {}
                Ok(names) => writeln!(out, "{}", names.join("  "))?,
                Err(e) => writeln!(out, "ls: cannot access '{path}': {e}")?,
            },
            Command::Cd(path) => {
                if let Err(e) = self.vfs.change_directory(&path) {
                    writeln!(out, "cd: {e}")?;
                }
            }
            Command::Mv { source, dest } => {
                if let Err(e) = self.vfs.move_node(&source, &dest) {
                    writeln!(out, "mv: cannot move '{source}' to '{dest}': {e}")?;
                }
            }
            Command::Tree(path) => match self.vfs.tree(path.as_deref()) {
                Ok(view) => writeln!(out, "{view}")?,
                Err(e) => writeln!(out, "tree: {e}")?,
            },
            Command::Uname => writeln!(out, "{}", self.vfs.system_name())?,
            Command::Exit => self.running = false,
        }
        Ok(())
    }

    /// Parse and run one line. Parse failures are reported on `out`.
    pub fn run_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        match Command::parse(line) {
            Ok(command) => self.execute(command, out),
            Err(ParseError::Empty) => Ok(()),
            Err(e) => writeln!(out, "{e}"),
        }
    }

    /// Prompt, read and execute until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        let mut line = Vec::new();
        while self.running {
            write!(out, "{}", self.prompt())?;
            out.flush()?;

            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            let text = String::from_utf8_lossy(&line);
            self.run_line(text.trim(), out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_core::ArchiveEntry;

    fn shell() -> Shell {
        Shell::new(Vfs::from_entries(vec![
            ArchiveEntry::directory("root/"),
            ArchiveEntry::file("root/a.txt", "hi"),
            ArchiveEntry::file("root/b.txt", ""),
            ArchiveEntry::directory("root/empty/"),
        ]))
    }

    fn run(shell: &mut Shell, line: &str) -> String {
        let mut out = Vec::new();
        shell.run_line(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("ls").unwrap(), Command::Ls(".".into()));
        assert_eq!(Command::parse("  ls   /root ").unwrap(), Command::Ls("/root".into()));
        assert_eq!(Command::parse("cd ..").unwrap(), Command::Cd("..".into()));
        assert_eq!(
            Command::parse("mv a b").unwrap(),
            Command::Mv { source: "a".into(), dest: "b".into() }
        );
        assert_eq!(Command::parse("tree").unwrap(), Command::Tree(None));
        assert_eq!(Command::parse("tree /root").unwrap(), Command::Tree(Some("/root".into())));
        assert_eq!(Command::parse("uname").unwrap(), Command::Uname);
        assert_eq!(Command::parse("exit").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(Command::parse("cd"), Err(ParseError::MissingDirectory));
        assert_eq!(Command::parse("mv a"), Err(ParseError::MissingFileOperand));
        assert_eq!(Command::parse("mv a b c"), Err(ParseError::MissingFileOperand));
        assert_eq!(
            Command::parse("rm -rf /").unwrap_err().to_string(),
            "rm: command not found"
        );
    }

    #[test]
    fn test_ls() {
        let mut shell = shell();
        assert_eq!(run(&mut shell, "ls"), "root\n");
        assert_eq!(run(&mut shell, "ls /root"), "a.txt  b.txt  empty\n");
        assert_eq!(run(&mut shell, "ls /root/empty"), "");
        assert_eq!(
            run(&mut shell, "ls /nope"),
            "ls: cannot access '/nope': No such file or directory: /nope\n"
        );
    }

    #[test]
    fn test_cd_and_prompt() {
        let mut shell = shell();
        assert_eq!(shell.prompt(), "/$ ");
        assert_eq!(run(&mut shell, "cd root"), "");
        assert_eq!(shell.prompt(), "/root$ ");
        assert_eq!(run(&mut shell, "cd a.txt"), "cd: Not a directory: /root/a.txt\n");
        assert_eq!(run(&mut shell, "cd"), "cd: missing operand\n");
        assert_eq!(run(&mut shell, "cd .."), "");
        assert_eq!(shell.prompt(), "/$ ");
    }

    #[test]
    fn test_mv() {
        let mut shell = shell();
        assert_eq!(run(&mut shell, "mv /root/a.txt /root/c.txt"), "");
        assert_eq!(run(&mut shell, "ls /root"), "b.txt  c.txt  empty\n");
        assert_eq!(
            run(&mut shell, "mv /root/zzz /root/empty"),
            "mv: cannot move '/root/zzz' to '/root/empty': No such file or directory: /root/zzz\n"
        );
        assert_eq!(run(&mut shell, "mv only"), "mv: missing file operand\n");
    }

    #[test]
    fn test_tree_and_uname() {
        let mut shell = shell();
        run(&mut shell, "cd /root");
        assert_eq!(
            run(&mut shell, "tree"),
            "/root\n├── a.txt\n├── b.txt\n└── empty\n"
        );
        assert_eq!(run(&mut shell, "uname"), "VirtualShell Emulator 1.0\n");
    }

    #[test]
    fn test_unknown_command() {
        let mut shell = shell();
        assert_eq!(run(&mut shell, "pwd"), "pwd: command not found\n");
        assert_eq!(run(&mut shell, ""), "");
    }

    #[test]
    fn test_run_loop_until_exit() {
        let mut shell = shell();
        let input = b"cd root\nls\nexit\nls\n";
        let mut out = Vec::new();
        shell.run(&input[..], &mut out).unwrap();

        assert!(!shell.is_running());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "/$ /root$ a.txt  b.txt  empty\n/root$ ");
    }

    #[test]
    fn test_run_loop_until_eof() {
        let mut shell = shell();
        let mut out = Vec::new();
        shell.run(&b"uname\n"[..], &mut out).unwrap();

        assert!(shell.is_running());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "/$ VirtualShell Emulator 1.0\n/$ \n");
    }

    #[test]
    fn test_run_loop_survives_invalid_utf8() {
        let mut shell = shell();
        let mut out = Vec::new();
        shell.run(&b"cd \xff\nls /root\n"[..], &mut out).unwrap();

        assert!(shell.is_running());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "/$ cd: No such file or directory: /\u{fffd}\n/$ a.txt  b.txt  empty\n/$ \n"
        );
    }

    #[test]
    fn test_colored_prompt_contains_path() {
        let shell = shell().with_color(true);
        let prompt = shell.prompt();
        assert!(prompt.contains('/'));
        assert!(prompt.ends_with("$ "));
        assert_ne!(prompt, "/$ ");
    }
}
