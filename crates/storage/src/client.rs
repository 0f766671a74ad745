//! Storage client.
//!
//! The REST server owns the workout data, while templates and the session
//! live in browser local storage. The client composes both backends behind
//! the domain repository traits and keeps the active session in memory for
//! authorizing requests.

use std::cell::RefCell;

use liftlog_domain as domain;
use liftlog_domain::TemplateRepository as _;
use log::error;

use super::local_storage;
use super::rest::{GlooNetSendRequest, Rest, SendRequest};

pub struct Client<S: SendRequest> {
    pub rest: Rest<S>,
    session: RefCell<Option<domain::Session>>,
}

impl Client<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rest: Rest::new(),
            session: RefCell::new(None),
        }
    }
}

impl Default for Client<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> Client<S> {
    fn token(&self) -> Result<domain::AccessToken, domain::StorageError> {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.token.clone())
            .ok_or(domain::StorageError::NoSession)
    }
}

impl<S: SendRequest> domain::SessionRepository for Client<S> {
    async fn request_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<domain::Session, domain::ReadError> {
        let session = self.rest.request_session(email, password).await?;
        if let Err(err) = local_storage::Auth.write_session(&session) {
            error!("failed to persist session: {err}");
        }
        *self.session.borrow_mut() = Some(session.clone());
        Ok(session)
    }

    async fn initialize_session(&self) -> Result<domain::Session, domain::ReadError> {
        let session = local_storage::Auth.read_session()?;
        *self.session.borrow_mut() = Some(session.clone());
        Ok(session)
    }

    async fn register(&self, email: &str, password: &str) -> Result<(), domain::CreateError> {
        self.rest.register(email, password).await
    }

    async fn delete_session(&self) -> Result<(), domain::DeleteError> {
        local_storage::Auth.clear_session();
        *self.session.borrow_mut() = None;
        Ok(())
    }
}

impl<S: SendRequest> domain::WorkoutRepository for Client<S> {
    async fn read_workouts(
        &self,
        page: domain::Page,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.rest.read_workouts(page, &self.token()?).await
    }

    async fn read_public_workouts(
        &self,
        page: domain::Page,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.rest.read_public_workouts(page, &self.token()?).await
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        self.rest.read_workout(id, &self.token()?).await
    }

    async fn create_workout(
        &self,
        draft: domain::WorkoutDraft,
    ) -> Result<domain::Workout, domain::CreateError> {
        self.rest.create_workout(draft, &self.token()?).await
    }
}

impl<S: SendRequest> domain::TemplateRepository for Client<S> {
    async fn read_templates(&self) -> Result<Vec<domain::Template>, domain::ReadError> {
        local_storage::Templates.read_templates().await
    }

    async fn create_template(
        &self,
        draft: domain::TemplateDraft,
    ) -> Result<domain::Template, domain::CreateError> {
        local_storage::Templates.create_template(draft).await
    }

    async fn delete_template(
        &self,
        id: domain::TemplateID,
    ) -> Result<domain::TemplateID, domain::DeleteError> {
        local_storage::Templates.delete_template(id).await
    }
}

#[cfg(test)]
mod tests {
    use liftlog_domain::WorkoutRepository;

    use crate::rest::{HttpRequest, HttpResponse, SendError};

    use super::*;

    struct UnreachableSender;

    impl SendRequest for UnreachableSender {
        async fn send_request(&self, _: HttpRequest) -> Result<HttpResponse, SendError> {
            panic!("no request expected");
        }
    }

    fn client() -> Client<UnreachableSender> {
        Client {
            rest: Rest::with_sender(UnreachableSender),
            session: RefCell::new(None),
        }
    }

    #[tokio::test]
    async fn test_workouts_require_session() {
        assert!(matches!(
            client().read_workouts(domain::Page::default()).await,
            Err(domain::ReadError::Storage(domain::StorageError::NoSession))
        ));
    }

    #[tokio::test]
    async fn test_create_workout_requires_session() {
        let draft = domain::WorkoutDraft::new(
            domain::Name::new("Leg Day").unwrap(),
            "2024-03-10".parse().unwrap(),
            false,
            vec![domain::Exercise {
                name: String::from("Squat"),
                sets: vec![domain::Set {
                    weight: domain::Weight::new(100.0).unwrap(),
                    reps: domain::Reps::new(5).unwrap(),
                }],
            }],
        )
        .unwrap();

        assert!(matches!(
            client().create_workout(draft).await,
            Err(domain::CreateError::Storage(domain::StorageError::NoSession))
        ));
    }
}
