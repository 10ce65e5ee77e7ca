use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;

use log::debug;
use wait_timeout::ChildExt;

use super::InvocationError;
use super::Solver;
use super::SolverOutput;

/// A [`Solver`] which runs an external executable as `<executable> [args...] <instance>`.
///
/// The standard output and error of the child are redirected to anonymous temporary files, so a
/// chatty solver cannot block on a full pipe while it is waited upon.
#[derive(Clone, Debug)]
pub struct ProcessSolver {
    executable: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessSolver {
    pub fn new(executable: impl Into<PathBuf>) -> ProcessSolver {
        ProcessSolver {
            executable: executable.into(),
            args: vec![],
            timeout: None,
        }
    }

    /// Add arguments which are passed to the solver before the instance path.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::<String>::into));
        self
    }

    /// Kill the solver if it does not finish within `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Solver for ProcessSolver {
    fn invoke(&self, instance: &Path) -> Result<SolverOutput, InvocationError> {
        let mut stdout_file = tempfile::tempfile()?;
        let mut stderr_file = tempfile::tempfile()?;

        let mut command = Command::new(&self.executable);
        let _ = command
            .args(&self.args)
            .arg(instance)
            .stdout(stdout_file.try_clone()?)
            .stderr(stderr_file.try_clone()?)
            .stdin(Stdio::null());

        debug!("Running {command:?}");

        let mut child = command.spawn().map_err(InvocationError::Launch)?;

        let status = match self.timeout {
            Some(timeout) => match wait_or_kill(&mut child, |child| child.wait_timeout(timeout))? {
                Some(status) => status,
                None => {
                    kill_and_reap(&mut child)?;
                    return Err(InvocationError::Timeout(timeout));
                }
            },
            None => wait_or_kill(&mut child, Child::wait)?,
        };

        Ok(SolverOutput {
            stdout: read_captured(&mut stdout_file)?,
            stderr: read_captured(&mut stderr_file)?,
            exit_code: status.code(),
        })
    }
}

/// Wait for `child` with `wait`. If waiting fails, the child is stopped before the error is
/// returned.
fn wait_or_kill<T>(
    child: &mut Child,
    wait: impl FnOnce(&mut Child) -> std::io::Result<T>,
) -> std::io::Result<T> {
    match wait(child) {
        Ok(waited) => Ok(waited),
        Err(error) => {
            let _ = kill_and_reap(child);
            Err(error)
        }
    }
}

/// Stop `child` and wait for it, so it does not linger as a zombie.
fn kill_and_reap(child: &mut Child) -> std::io::Result<()> {
    // The child may have exited in the meantime, in which case killing fails.
    let _ = child.kill();
    let _ = child.wait()?;
    Ok(())
}

fn read_captured(file: &mut File) -> std::io::Result<String> {
    file.rewind()?;

    let mut bytes = Vec::new();
    let _ = file.read_to_end(&mut bytes)?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
