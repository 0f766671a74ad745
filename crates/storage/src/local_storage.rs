//! Browser local storage backend.
//!
//! Holds everything that never leaves the client: the session, the
//! template collection and the log ring buffer. All keys share the
//! `fitness_tracker_` prefix.

use std::collections::VecDeque;

use chrono::Utc;
use gloo_storage::Storage as GlooStorage;
use liftlog_domain as domain;
use liftlog_web_app::log;

const KEY_TOKEN: &str = "fitness_tracker_token";
const KEY_EMAIL: &str = "fitness_tracker_email";
const KEY_TEMPLATES: &str = "fitness_tracker_templates";
const KEY_LOG: &str = "fitness_tracker_log";

pub struct Auth;

impl Auth {
    /// Restores the session persisted by a previous login. An absent token
    /// means the user is signed out.
    pub fn read_session(&self) -> Result<domain::Session, domain::StorageError> {
        let token: String = gloo_storage::LocalStorage::get(KEY_TOKEN)
            .map_err(|_| domain::StorageError::NoSession)?;
        let email: String = gloo_storage::LocalStorage::get(KEY_EMAIL)
            .map_err(|_| domain::StorageError::NoSession)?;
        Ok(domain::Session {
            token: token.into(),
            email,
        })
    }

    pub fn write_session(&self, session: &domain::Session) -> Result<(), domain::StorageError> {
        gloo_storage::LocalStorage::set(KEY_TOKEN, session.token.as_ref())
            .map_err(|err| domain::StorageError::Other(Box::new(err)))?;
        gloo_storage::LocalStorage::set(KEY_EMAIL, &session.email)
            .map_err(|err| domain::StorageError::Other(Box::new(err)))
    }

    pub fn clear_session(&self) {
        gloo_storage::LocalStorage::delete(KEY_TOKEN);
        gloo_storage::LocalStorage::delete(KEY_EMAIL);
    }
}

pub struct Templates;

impl Templates {
    /// Missing or malformed stored JSON normalizes to an empty collection.
    fn stored(&self) -> Vec<domain::Template> {
        gloo_storage::LocalStorage::get(KEY_TEMPLATES).unwrap_or_default()
    }

    fn store(&self, templates: &[domain::Template]) -> Result<(), domain::StorageError> {
        gloo_storage::LocalStorage::set(KEY_TEMPLATES, templates)
            .map_err(|err| domain::StorageError::Other(Box::new(err)))
    }
}

impl domain::TemplateRepository for Templates {
    async fn read_templates(&self) -> Result<Vec<domain::Template>, domain::ReadError> {
        Ok(self.stored())
    }

    async fn create_template(
        &self,
        draft: domain::TemplateDraft,
    ) -> Result<domain::Template, domain::CreateError> {
        let now = Utc::now();
        let template = draft.into_template(domain::TemplateID::from_timestamp(now), now);
        let mut templates = self.stored();
        templates.push(template.clone());
        self.store(&templates)?;
        Ok(template)
    }

    async fn delete_template(
        &self,
        id: domain::TemplateID,
    ) -> Result<domain::TemplateID, domain::DeleteError> {
        let mut templates = self.stored();
        templates.retain(|template| template.id != id);
        self.store(&templates)?;
        Ok(id)
    }
}

pub struct Log;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(VecDeque::new()),
            Err(err) => Err(log::Error::Unknown(err.to_string())),
        }
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(log::MAX_ENTRIES);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
