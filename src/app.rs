//! Client-side state of the gradebook and its transitions.
//!
//! `GradebookApp` owns everything the view needs: the last listing, the add
//! form inputs, the busy flag, the advisory message, and the single edit
//! session. Every mutating operation follows the same cycle: refuse while
//! busy, send one request, re-fetch the whole listing on success, and clear
//! busy on every path.

use crate::client::GradebookService;
use crate::error::GradebookError;
use crate::models::{parse_grade, parse_grade_strict, SubjectRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub id: usize,
    pub staged_grade: String,
}

pub struct GradebookApp<S> {
    service: S,
    subjects: Vec<SubjectRecord>,
    new_subject: String,
    new_grade: String,
    busy: bool,
    message: Option<String>,
    editing: Option<EditSession>,
}

impl<S: GradebookService> GradebookApp<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            subjects: Vec::new(),
            new_subject: String::new(),
            new_grade: String::new(),
            busy: false,
            message: None,
            editing: None,
        }
    }

    #[cfg(test)]
    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn subjects(&self) -> &[SubjectRecord] {
        &self.subjects
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[cfg(test)]
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn inputs(&self) -> (&str, &str) {
        (&self.new_subject, &self.new_grade)
    }

    pub fn set_inputs(&mut self, subject: impl Into<String>, grade: impl Into<String>) {
        self.new_subject = subject.into();
        self.new_grade = grade.into();
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SubjectRecord> {
        self.subjects
            .iter()
            .find(|record| record.name.eq_ignore_ascii_case(name))
    }

    /// Replaces the listing with a fresh snapshot from the service.
    ///
    /// On failure the current listing is kept as it was.
    pub async fn refresh(&mut self) -> Result<(), GradebookError> {
        self.message = None;
        let fetched = self.service.show().await;
        match fetched {
            Ok(records) => {
                tracing::debug!(count = records.len(), "gradebook listing refreshed");
                self.subjects = records;
                // Ordinals were reassigned, so the old session points nowhere.
                self.editing = None;
                Ok(())
            }
            Err(source) => Err(self.report(GradebookError::Fetch(source))),
        }
    }

    pub async fn submit_add(&mut self) -> Result<(), GradebookError> {
        if self.busy {
            tracing::debug!("add ignored while busy");
            return Ok(());
        }
        if self.new_subject.is_empty() || self.new_grade.is_empty() {
            tracing::debug!("add ignored with empty input");
            return Ok(());
        }

        self.busy = true;
        self.message = None;
        let result = self.add_staged().await;
        self.busy = false;
        result
    }

    async fn add_staged(&mut self) -> Result<(), GradebookError> {
        let grade = parse_grade(&self.new_grade);
        let sent = self.service.add(&self.new_subject, grade).await;
        if let Err(source) = sent {
            let subject = self.new_subject.clone();
            return Err(self.report(GradebookError::Add { subject, source }));
        }

        // A failed re-fetch reports itself; the add already went through.
        let _ = self.refresh().await;
        self.new_subject.clear();
        self.new_grade.clear();
        Ok(())
    }

    /// Opens the edit session on `id`, replacing any session already open.
    pub fn start_edit(&mut self, id: usize) {
        if self.busy {
            return;
        }
        match self.subjects.iter().find(|record| record.id == id) {
            Some(record) => {
                self.editing = Some(EditSession {
                    id,
                    staged_grade: record.grade.to_string(),
                });
            }
            None => tracing::debug!(id, "no subject at ordinal"),
        }
    }

    pub fn stage_edit_grade(&mut self, text: impl Into<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.staged_grade = text.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        if !self.busy {
            self.editing = None;
        }
    }

    pub async fn save_edit(&mut self) -> Result<(), GradebookError> {
        if self.busy {
            return Ok(());
        }
        let Some(session) = self.editing.clone() else {
            return Ok(());
        };

        let new_grade = match parse_grade_strict(&session.staged_grade) {
            Some(value) => value,
            None => {
                let err = GradebookError::Validation(session.staged_grade.clone());
                return Err(self.report(err));
            }
        };
        let Some(subject) = self
            .subjects
            .iter()
            .find(|record| record.id == session.id)
            .map(|record| record.name.clone())
        else {
            self.editing = None;
            return Ok(());
        };

        self.busy = true;
        self.message = None;
        let result = self.update_subject(subject, new_grade).await;
        self.busy = false;
        result
    }

    async fn update_subject(&mut self, subject: String, new_grade: f64) -> Result<(), GradebookError> {
        let sent = self.service.update(&subject, new_grade).await;
        if let Err(source) = sent {
            return Err(self.report(GradebookError::Update { subject, source }));
        }
        let _ = self.refresh().await;
        self.editing = None;
        Ok(())
    }

    /// Deletes the subject at `id` once `confirm` accepts the prompt.
    pub async fn delete<F>(&mut self, id: usize, confirm: F) -> Result<(), GradebookError>
    where
        F: FnOnce(&str) -> bool,
    {
        if self.busy {
            return Ok(());
        }
        let Some(subject) = self
            .subjects
            .iter()
            .find(|record| record.id == id)
            .map(|record| record.name.clone())
        else {
            tracing::debug!(id, "no subject at ordinal");
            return Ok(());
        };
        if !confirm(&format!("Are you sure you want to delete {subject}?")) {
            tracing::debug!(%subject, "delete declined");
            return Ok(());
        }

        self.busy = true;
        self.message = None;
        let result = self.remove_subject(subject).await;
        self.busy = false;
        result
    }

    async fn remove_subject(&mut self, subject: String) -> Result<(), GradebookError> {
        let sent = self.service.remove(&subject).await;
        if let Err(source) = sent {
            return Err(self.report(GradebookError::Delete { subject, source }));
        }
        let _ = self.refresh().await;
        Ok(())
    }

    fn report(&mut self, err: GradebookError) -> GradebookError {
        tracing::error!(error = %err, "{}", err.advisory());
        self.message = Some(err.advisory().to_string());
        err
    }
}
