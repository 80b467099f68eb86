use anyhow::Result;
use console::{style, Term};
use std::time::Instant;

/// Runs the ordered steps of a packaging pipeline, numbering each one and
/// reporting how long it took. Unless `keep_output` or `verbose` is set,
/// the in-progress line is replaced by the finished one.
pub struct TaskRunner {
    term: Term,
    num_tasks: u32,
    current_task: u32,
    verbose: bool,
}

impl TaskRunner {
    pub fn new(num_tasks: u32, verbose: bool) -> Self {
        Self {
            term: Term::stdout(),
            num_tasks,
            current_task: 0,
            verbose,
        }
    }

    fn task_id(&self) -> String {
        style(format!("[{}/{}]", self.current_task + 1, self.num_tasks))
            .force_styling(true)
            .to_string()
    }

    /// Steps that spawn child processes set `keep_output` so the child's
    /// stdout is not clobbered when the progress line is rewritten.
    pub fn run<T>(
        &mut self,
        descr: impl Into<String>,
        keep_output: bool,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let descr = descr.into();
        println!("{} {}", self.task_id(), &descr);
        let now = Instant::now();
        let result = f()?;
        if !keep_output && !self.verbose {
            self.term.clear_last_lines(1).ok();
        }
        println!(
            "{} {} [{}ms]",
            self.task_id(),
            &descr,
            now.elapsed().as_millis()
        );
        self.current_task += 1;
        Ok(result)
    }
}
