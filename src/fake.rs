//! In-memory stand-in for the gradebook service used by the app and shell tests.

use std::collections::HashSet;
use std::sync::Mutex;

use reqwest::StatusCode;

use crate::client::GradebookService;
use crate::error::RequestFailure;
use crate::models::SubjectRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Show,
    Add { subject: String, grade: f64 },
    Update { subject: String, new_grade: f64 },
    Remove { subject: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Show,
    Add,
    Update,
    Remove,
}

#[derive(Default)]
struct Inner {
    entries: Vec<(String, f64)>,
    calls: Vec<Call>,
    failing: HashSet<Op>,
}

/// Keeps entries in insertion order and matches names case-insensitively,
/// like the legacy service does.
#[derive(Default)]
pub struct FakeGradebook {
    inner: Mutex<Inner>,
}

impl FakeGradebook {
    pub fn with_entries(entries: &[(&str, f64)]) -> Self {
        let fake = Self::default();
        fake.inner.lock().unwrap().entries = entries
            .iter()
            .map(|(name, grade)| (name.to_string(), *grade))
            .collect();
        fake
    }

    pub fn fail(&self, op: Op) {
        self.inner.lock().unwrap().failing.insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.inner.lock().unwrap().failing.remove(&op);
    }

    /// Replaces the service-side data without recording a call.
    pub fn set_entries(&self, entries: &[(&str, f64)]) {
        self.inner.lock().unwrap().entries = entries
            .iter()
            .map(|(name, grade)| (name.to_string(), *grade))
            .collect();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    fn record(&self, op: Op, call: Call) -> Result<std::sync::MutexGuard<'_, Inner>, RequestFailure> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.failing.contains(&op) {
            return Err(RequestFailure::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(inner)
    }
}

impl GradebookService for FakeGradebook {
    async fn show(&self) -> Result<Vec<SubjectRecord>, RequestFailure> {
        let inner = self.record(Op::Show, Call::Show)?;
        Ok(inner
            .entries
            .iter()
            .enumerate()
            .map(|(id, (name, grade))| SubjectRecord {
                id,
                name: name.clone(),
                grade: *grade,
            })
            .collect())
    }

    async fn add(&self, subject: &str, grade: f64) -> Result<(), RequestFailure> {
        let call = Call::Add {
            subject: subject.to_string(),
            grade,
        };
        let mut inner = self.record(Op::Add, call)?;
        inner.entries.push((subject.to_string(), grade));
        Ok(())
    }

    async fn update(&self, subject: &str, new_grade: f64) -> Result<(), RequestFailure> {
        let call = Call::Update {
            subject: subject.to_string(),
            new_grade,
        };
        let mut inner = self.record(Op::Update, call)?;
        if let Some(entry) = inner
            .entries
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(subject))
        {
            entry.1 = new_grade;
        }
        Ok(())
    }

    async fn remove(&self, subject: &str) -> Result<(), RequestFailure> {
        let call = Call::Remove {
            subject: subject.to_string(),
        };
        let mut inner = self.record(Op::Remove, call)?;
        if let Some(pos) = inner
            .entries
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(subject))
        {
            inner.entries.remove(pos);
        }
        Ok(())
    }
}
