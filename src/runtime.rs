use std::future::Future;

use once_cell::sync::Lazy;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::oneshot;

use crate::student_form::{SubmissionTicket, SubmitOutcome};

static TOKIO_RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("evolveed-rt")
        .enable_time()
        .build()
        .expect("Failed to build Tokio runtime")
});

/// Runs `fut` to completion on the shared runtime. Not for use inside async code.
pub fn block_on<F: Future>(fut: F) -> F::Output {
    TOKIO_RUNTIME.block_on(fut)
}

/// Waits out a submission in the background; the receiver resolves once it is done.
pub fn spawn_submission(ticket: SubmissionTicket) -> oneshot::Receiver<SubmitOutcome> {
    let (tx, rx) = oneshot::channel();
    TOKIO_RUNTIME.spawn(async move {
        let outcome = ticket.wait().await;
        // the UI may have gone away; nothing to report to then
        let _ = tx.send(outcome);
    });
    rx
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::roster::opening_draft;
    use crate::session::Role;
    use crate::student_form::{FormField, StudentForm, SAVED_MESSAGE};

    #[test]
    fn shared_runtime_runs_timers() {
        let slept = block_on(async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            "done"
        });
        assert_eq!(slept, "done");
    }

    #[test]
    fn spawned_submission_reports_back() {
        let mut form = StudentForm::with_initial(opening_draft(Role::Faculty))
            .with_submit_delay(Duration::from_millis(1));
        assert!(form.advance());
        form.set_field(FormField::Backlogs, "1");
        assert!(form.advance());

        let rx = spawn_submission(form.begin_submit().unwrap());
        let outcome = block_on(rx).unwrap();
        assert_eq!(outcome.message, SAVED_MESSAGE);
        assert_eq!(outcome.student_id, "UPES2022001");
    }
}
