//! Drive one submission from the terminal

use comic_application::{ComicSession, GenerationGateway};
use comic_domain::AppStatus;
use tracing::info;

/// How a submission attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The session did not accept the question (blank, or already busy)
    Rejected,
    /// The submission reached Success or Error
    Finished(AppStatus),
    /// Ctrl-C arrived while Loading; the session was reset
    Cancelled,
}

/// Submit `question` and wait for the outcome.
///
/// Ctrl-C while waiting resets the session. The abandoned submission keeps
/// running in the background and its results are ignored.
pub async fn submit_and_wait<G: GenerationGateway + 'static>(
    session: &ComicSession<G>,
    question: &str,
) -> SubmissionOutcome {
    submit_and_wait_until(session, question, async {
        // a failed handler install means Ctrl-C cannot be observed; never resolve
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// [`submit_and_wait`] with an arbitrary cancellation trigger
pub async fn submit_and_wait_until<G, C>(
    session: &ComicSession<G>,
    question: &str,
    cancel: C,
) -> SubmissionOutcome
where
    G: GenerationGateway + 'static,
    C: Future<Output = ()>,
{
    let Some(submission) = session.submit(question) else {
        return SubmissionOutcome::Rejected;
    };

    tokio::select! {
        status = session.wait() => SubmissionOutcome::Finished(status),
        _ = cancel => {
            session.reset();
            info!("Submission {} cancelled by user", submission);
            SubmissionOutcome::Cancelled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use comic_application::{
        AssembleComicUseCase, GatewayError, GenerationParams, NoObserver, ResponsePart,
    };
    use comic_domain::Model;
    use std::sync::Arc;
    use std::time::Duration;

    struct CannedGateway {
        image_delay: Duration,
    }

    #[async_trait]
    impl GenerationGateway for CannedGateway {
        async fn generate_structured(
            &self,
            _model: &Model,
            _prompt: &str,
            schema: &serde_json::Value,
        ) -> Result<String, GatewayError> {
            if schema["properties"].get("panels").is_some() {
                Ok(r#"{"title": "Tiny Title", "panels": [{"scene": 1, "description": "d", "narration": "n"}], "summary": "s"}"#.to_string())
            } else {
                Ok(r#"{"name": "Marie Curie", "description": "chemist"}"#.to_string())
            }
        }

        async fn generate_image(
            &self,
            _model: &Model,
            _prompt: &str,
        ) -> Result<Vec<ResponsePart>, GatewayError> {
            tokio::time::sleep(self.image_delay).await;
            Ok(vec![ResponsePart::InlineData {
                mime_type: "image/png".to_string(),
                data: "AAAA".to_string(),
            }])
        }
    }

    fn session(image_delay: Duration) -> ComicSession<CannedGateway> {
        let assembler = AssembleComicUseCase::new(
            Arc::new(CannedGateway { image_delay }),
            GenerationParams::default(),
        );
        ComicSession::new(Arc::new(assembler), Arc::new(NoObserver))
    }

    #[tokio::test(start_paused = true)]
    async fn test_finishes_with_success() {
        let session = session(Duration::from_millis(10));
        let outcome =
            submit_and_wait_until(&session, "What is radium?", std::future::pending()).await;
        assert_eq!(outcome, SubmissionOutcome::Finished(AppStatus::Success));
        assert_eq!(session.status(), AppStatus::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_question_is_rejected() {
        let session = session(Duration::ZERO);
        let outcome = submit_and_wait_until(&session, "   ", std::future::pending()).await;
        assert_eq!(outcome, SubmissionOutcome::Rejected);
        assert_eq!(session.status(), AppStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_resets_to_idle() {
        let session = session(Duration::from_secs(60));
        let outcome = submit_and_wait_until(
            &session,
            "What is radium?",
            tokio::time::sleep(Duration::from_secs(1)),
        )
        .await;
        assert_eq!(outcome, SubmissionOutcome::Cancelled);
        assert_eq!(session.status(), AppStatus::Idle);

        // the abandoned submission finishing later changes nothing
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(session.status(), AppStatus::Idle);
    }
}
