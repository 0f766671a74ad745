use log::{debug, error};

use crate::{
    CreateError, DeleteError, Page, ReadError, Session, SessionRepository, SessionService,
    Template, TemplateDraft, TemplateID, TemplateRepository, TemplateService, Workout,
    WorkoutDraft, WorkoutID, WorkoutRepository, WorkoutService,
};

/// Application service in front of a repository.
///
/// Adds logging and the lookups that span repository operations. Loss of
/// connectivity is expected during normal use and logged at debug level
/// only.
pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn request_session(&self, email: &str, password: &str) -> Result<Session, ReadError> {
        log_on_error!(
            self.repository.request_session(email, password),
            ReadError,
            "request",
            "session"
        )
    }

    async fn get_session(&self) -> Result<Session, ReadError> {
        self.repository.initialize_session().await
    }

    async fn register(&self, email: &str, password: &str) -> Result<(), CreateError> {
        log_on_error!(
            self.repository.register(email, password),
            CreateError,
            "register",
            "account"
        )
    }

    async fn delete_session(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.delete_session(),
            DeleteError,
            "delete",
            "session"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self, page: Page) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(page),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_public_workouts(&self, page: Page) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_public_workouts(page),
            ReadError,
            "get",
            "public workouts"
        )
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
        log_on_error!(
            self.repository.read_workout(id),
            ReadError,
            "get",
            "workout"
        )
    }

    async fn create_workout(&self, draft: WorkoutDraft) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(draft),
            CreateError,
            "create",
            "workout"
        )
    }
}

impl<R: TemplateRepository> TemplateService for Service<R> {
    async fn get_templates(&self) -> Result<Vec<Template>, ReadError> {
        log_on_error!(
            self.repository.read_templates(),
            ReadError,
            "get",
            "templates"
        )
    }

    async fn get_template(&self, id: TemplateID) -> Result<Template, ReadError> {
        self.get_templates()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(ReadError::NotFound)
    }

    async fn create_template(&self, draft: TemplateDraft) -> Result<Template, CreateError> {
        log_on_error!(
            self.repository.create_template(draft),
            CreateError,
            "create",
            "template"
        )
    }

    async fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError> {
        log_on_error!(
            self.repository.delete_template(id),
            DeleteError,
            "delete",
            "template"
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use crate::{Exercise, Name, Reps, Set, Weight};

    use super::*;

    /// In-memory stand-in for the local-storage template store.
    struct InMemoryTemplates {
        templates: RefCell<Vec<Template>>,
    }

    impl InMemoryTemplates {
        fn new() -> Self {
            Self {
                templates: RefCell::new(vec![]),
            }
        }
    }

    impl TemplateRepository for InMemoryTemplates {
        async fn read_templates(&self) -> Result<Vec<Template>, ReadError> {
            Ok(self.templates.borrow().clone())
        }

        async fn create_template(&self, draft: TemplateDraft) -> Result<Template, CreateError> {
            let mut templates = self.templates.borrow_mut();
            let id = TemplateID::from(u64::try_from(templates.len()).unwrap() + 1);
            let template = draft.into_template(id, Utc::now());
            templates.push(template.clone());
            Ok(template)
        }

        async fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError> {
            self.templates.borrow_mut().retain(|t| t.id != id);
            Ok(id)
        }
    }

    fn draft(name: &str) -> TemplateDraft {
        TemplateDraft::new(
            Name::new(name).unwrap(),
            Some(String::from("Strength work")),
            vec![Exercise {
                name: String::from("Squat"),
                sets: vec![Set {
                    weight: Weight::new(100.0).unwrap(),
                    reps: Reps::new(5).unwrap(),
                }],
            }],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_template_round_trip() {
        let service = Service::new(InMemoryTemplates::new());

        let template = service.create_template(draft("Leg Day")).await.unwrap();
        let templates = service.get_templates().await.unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, Name::new("Leg Day").unwrap());
        assert_eq!(templates[0].description, Some(String::from("Strength work")));
        assert_eq!(templates[0].exercises, draft("Leg Day").exercises);

        service.delete_template(template.id).await.unwrap();
        assert!(service.get_templates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_template_by_id() {
        let service = Service::new(InMemoryTemplates::new());
        let template = service.create_template(draft("Leg Day")).await.unwrap();

        let found = service.get_template(template.id).await.unwrap();
        assert_eq!(found, template);

        assert!(matches!(
            service.get_template(TemplateID::from(999)).await,
            Err(ReadError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_template_is_noop() {
        let service = Service::new(InMemoryTemplates::new());
        service.create_template(draft("Leg Day")).await.unwrap();

        service
            .delete_template(TemplateID::from(999))
            .await
            .unwrap();
        assert_eq!(service.get_templates().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_templates_listed_in_insertion_order() {
        let service = Service::new(InMemoryTemplates::new());
        service.create_template(draft("Leg Day")).await.unwrap();
        service.create_template(draft("Push Day")).await.unwrap();

        let names = service
            .get_templates()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![Name::new("Leg Day").unwrap(), Name::new("Push Day").unwrap()]
        );
    }
}
