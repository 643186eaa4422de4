use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use simple_supervisor::errors::Result;
use simple_supervisor::exec::{Command, CommandOutput, CommandRunner, check_output};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub argv: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn is(&self, argv: &[&str]) -> bool {
        self.argv.iter().map(String::as_str).eq(argv.iter().copied())
    }
}

/// Scripted reply for commands matching a predicate.
struct Rule {
    matches: Box<dyn Fn(&Command) -> bool + Send>,
    output: CommandOutput,
}

/// A fake runner that:
/// - records every command it is asked to run
/// - answers from scripted rules (first matching rule wins)
/// - otherwise reports success with empty output
///
/// `check` is honoured exactly like the real runner.
#[derive(Clone, Default)]
pub struct FakeRunner {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    rules: Arc<Mutex<Vec<Rule>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `stdout`/`stderr`/`code` to commands whose argv equals
    /// `argv` and whose cwd equals `cwd` (any cwd if `None`).
    pub fn reply(
        &self,
        argv: &[&str],
        cwd: Option<PathBuf>,
        code: i32,
        stdout: &str,
        stderr: &str,
    ) -> &Self {
        let expected: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
        let output = CommandOutput {
            argv: expected.clone(),
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        };
        let matches = move |cmd: &Command| {
            cmd.argv() == expected.as_slice()
                && cwd.as_ref().is_none_or(|c| cmd.cwd() == Some(c.as_path()))
        };
        self.rules.lock().unwrap().push(Rule {
            matches: Box::new(matches),
            output,
        });
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Invocations run with the given cwd.
    pub fn invocations_in(&self, cwd: &std::path::Path) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|i| i.cwd.as_deref() == Some(cwd))
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&mut self, command: &Command) -> Result<CommandOutput> {
        self.invocations.lock().unwrap().push(Invocation {
            argv: command.argv().to_vec(),
            cwd: command.cwd().map(|p| p.to_path_buf()),
        });

        let scripted = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|r| (r.matches)(command))
            .map(|r| r.output.clone());

        let output = scripted.unwrap_or_else(|| CommandOutput {
            argv: command.argv().to_vec(),
            code: Some(0),
            ..CommandOutput::default()
        });
        check_output(command, output)
    }
}
