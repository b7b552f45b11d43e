//! Application State Store — the in-memory job board and applicant list.
//!
//! Both collections are newest-first. Every mutation runs under one write lock
//! and rewrites the touched collection through the persistence adapter before
//! the lock is released.

pub mod persistence;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::models::{demo_jobs, Application, ApplicationId, ApplicationStatus, Job, JobId};

pub use persistence::{
    read_collection, read_record, write_collection, FileStore, KeyValueStore, MemoryStore,
    APPLICATIONS_KEY, JOBS_KEY,
};

#[derive(Debug, Default)]
struct Collections {
    jobs: Vec<Job>,
    applications: Vec<Application>,
}

/// Outcome of [`AppStore::transition_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    NotFound,
    /// The application had this status instead of the expected one.
    Stale(ApplicationStatus),
}

/// Cheap-to-clone handle to the shared state.
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<RwLock<Collections>>,
    persistence: Arc<dyn KeyValueStore>,
}

impl AppStore {
    /// Loads both collections. When `seed_demo_jobs` is set and no job record
    /// exists yet, the demo postings are installed and persisted.
    pub fn load(persistence: Arc<dyn KeyValueStore>, seed_demo_jobs: bool) -> Self {
        let stored_jobs = read_record::<Job>(persistence.as_ref(), JOBS_KEY);
        let applications = read_collection::<Application>(persistence.as_ref(), APPLICATIONS_KEY);

        let jobs = match stored_jobs {
            Some(jobs) => jobs,
            None if seed_demo_jobs => {
                let seeded = demo_jobs(Utc::now());
                persist(persistence.as_ref(), JOBS_KEY, &seeded);
                info!("Seeded {} demo job(s)", seeded.len());
                seeded
            }
            None => Vec::new(),
        };

        info!(
            "Store loaded: {} job(s), {} application(s)",
            jobs.len(),
            applications.len()
        );

        Self {
            inner: Arc::new(RwLock::new(Collections { jobs, applications })),
            persistence,
        }
    }

    /// Prepends `job`. No validation and no duplicate-id check.
    pub async fn add_job(&self, job: Job) {
        let mut state = self.inner.write().await;
        info!("Job posted: {} ({})", job.title, job.id);
        state.jobs.insert(0, job);
        persist(self.persistence.as_ref(), JOBS_KEY, &state.jobs);
    }

    /// Prepends `application`. The referenced job is not checked.
    pub async fn add_application(&self, application: Application) {
        let mut state = self.inner.write().await;
        info!(
            "Application {} stored with status {:?}",
            application.id, application.status
        );
        state.applications.insert(0, application);
        persist(self.persistence.as_ref(), APPLICATIONS_KEY, &state.applications);
    }

    /// Replaces the status of one application in place.
    ///
    /// Returns `false` (and changes nothing) when `id` is unknown. Setting the
    /// status it already has is a no-op.
    pub async fn update_status(&self, id: &ApplicationId, status: ApplicationStatus) -> bool {
        let mut state = self.inner.write().await;
        let Some(application) = state.applications.iter_mut().find(|a| &a.id == id) else {
            warn!("Status update for unknown application {id} ignored");
            return false;
        };

        if application.status == status {
            return true;
        }

        info!("Application {id}: {:?} -> {:?}", application.status, status);
        application.status = status;
        persist(self.persistence.as_ref(), APPLICATIONS_KEY, &state.applications);
        true
    }

    /// Moves one application from `from` to `to`, checking the current status
    /// under the same write lock that applies the change.
    pub async fn transition_status(
        &self,
        id: &ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Transition {
        let mut state = self.inner.write().await;
        let Some(application) = state.applications.iter_mut().find(|a| &a.id == id) else {
            return Transition::NotFound;
        };

        if application.status != from {
            return Transition::Stale(application.status);
        }

        info!("Application {id}: {from:?} -> {to:?}");
        application.status = to;
        persist(self.persistence.as_ref(), APPLICATIONS_KEY, &state.applications);
        Transition::Applied
    }

    pub async fn jobs(&self) -> Vec<Job> {
        self.inner.read().await.jobs.clone()
    }

    pub async fn applications(&self) -> Vec<Application> {
        self.inner.read().await.applications.clone()
    }

    pub async fn job(&self, id: &JobId) -> Option<Job> {
        self.inner
            .read()
            .await
            .jobs
            .iter()
            .find(|j| &j.id == id)
            .cloned()
    }

    pub async fn application(&self, id: &ApplicationId) -> Option<Application> {
        self.inner
            .read()
            .await
            .applications
            .iter()
            .find(|a| &a.id == id)
            .cloned()
    }
}

/// The in-memory state stays authoritative when a write fails.
fn persist<T: serde::Serialize>(store: &dyn KeyValueStore, key: &str, items: &[T]) {
    if let Err(e) = write_collection(store, key, items) {
        error!("Failed to persist '{key}': {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{application, empty_store, job};

    fn snapshot(kv: &MemoryStore) -> (Option<String>, Option<String>) {
        (kv.get(JOBS_KEY).unwrap(), kv.get(APPLICATIONS_KEY).unwrap())
    }

    #[tokio::test]
    async fn test_jobs_are_newest_first() {
        let (store, _) = empty_store();
        store.add_job(job("j1", "First")).await;
        store.add_job(job("j2", "Second")).await;

        let ids: Vec<String> = store.jobs().await.into_iter().map(|j| j.id.0).collect();
        assert_eq!(ids, vec!["j2", "j1"]);
    }

    #[tokio::test]
    async fn test_applications_are_newest_first_and_unvalidated() {
        let (store, _) = empty_store();
        store.add_application(application("a1", "missing-job", 80.0)).await;
        store.add_application(application("a2", "missing-job", 40.0)).await;

        let apps = store.applications().await;
        assert_eq!(apps[0].id.0, "a2");
        assert_eq!(apps[1].id.0, "a1");
    }

    #[tokio::test]
    async fn test_duplicate_job_ids_are_allowed() {
        let (store, _) = empty_store();
        store.add_job(job("same", "A")).await;
        store.add_job(job("same", "B")).await;
        assert_eq!(store.jobs().await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_status_is_in_place_and_keeps_other_fields() {
        let (store, _) = empty_store();
        store.add_application(application("a1", "j", 90.0)).await;
        store.add_application(application("a2", "j", 85.0)).await;
        let before = store.application(&ApplicationId("a1".into())).await.unwrap();

        assert!(
            store
                .update_status(&ApplicationId("a1".into()), ApplicationStatus::AssessmentSent)
                .await
        );

        let apps = store.applications().await;
        assert_eq!(apps[0].id.0, "a2");
        assert_eq!(apps[1].id.0, "a1");
        assert_eq!(apps[1].status, ApplicationStatus::AssessmentSent);
        assert_eq!(apps[1].analysis_result, before.analysis_result);
        assert_eq!(apps[1].applied_date, before.applied_date);
        assert_eq!(apps[1].candidate_email, before.candidate_email);
    }

    #[tokio::test]
    async fn test_update_status_twice_equals_once() {
        let (store, kv) = empty_store();
        store.add_application(application("a1", "j", 90.0)).await;
        let id = ApplicationId("a1".into());

        store.update_status(&id, ApplicationStatus::Hired).await;
        let once = snapshot(&kv);
        assert!(store.update_status(&id, ApplicationStatus::Hired).await);

        assert_eq!(snapshot(&kv), once);
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_changes_nothing() {
        let (store, kv) = empty_store();
        store.add_job(job("j", "Role")).await;
        store.add_application(application("a1", "j", 60.0)).await;
        let before = snapshot(&kv);
        let apps_before = store.applications().await;

        let found = store
            .update_status(&ApplicationId("nope".into()), ApplicationStatus::Hired)
            .await;

        assert!(!found);
        assert_eq!(snapshot(&kv), before);
        assert_eq!(store.applications().await, apps_before);
    }

    #[tokio::test]
    async fn test_transition_status_checks_current_status() {
        let (store, kv) = empty_store();
        store.add_application(application("a1", "j", 90.0)).await;
        let id = ApplicationId("a1".into());

        let outcome = store
            .transition_status(&id, ApplicationStatus::Shortlisted, ApplicationStatus::AssessmentSent)
            .await;
        assert_eq!(outcome, Transition::Applied);
        let after_first = snapshot(&kv);

        let outcome = store
            .transition_status(&id, ApplicationStatus::Shortlisted, ApplicationStatus::AssessmentSent)
            .await;
        assert_eq!(outcome, Transition::Stale(ApplicationStatus::AssessmentSent));
        assert_eq!(snapshot(&kv), after_first);

        let outcome = store
            .transition_status(
                &ApplicationId("nope".into()),
                ApplicationStatus::Shortlisted,
                ApplicationStatus::Hired,
            )
            .await;
        assert_eq!(outcome, Transition::NotFound);
    }

    #[tokio::test]
    async fn test_mutations_are_persisted_and_reload() {
        let (store, kv) = empty_store();
        store.add_job(job("j1", "Backend")).await;
        store.add_application(application("a1", "j1", 75.0)).await;
        store
            .update_status(&ApplicationId("a1".into()), ApplicationStatus::AssessmentSent)
            .await;

        let reloaded = AppStore::load(kv, true);
        let jobs = reloaded.jobs().await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Backend");
        let app = reloaded
            .application(&ApplicationId("a1".into()))
            .await
            .unwrap();
        assert_eq!(app.status, ApplicationStatus::AssessmentSent);
    }

    #[tokio::test]
    async fn test_seed_only_when_job_record_absent() {
        let kv = Arc::new(MemoryStore::default());
        let store = AppStore::load(kv.clone(), true);
        assert_eq!(store.jobs().await.len(), 2);
        assert!(kv.get(JOBS_KEY).unwrap().is_some());

        let empty = Arc::new(MemoryStore::default());
        empty.set(JOBS_KEY, "[]").unwrap();
        let store = AppStore::load(empty, true);
        assert!(store.jobs().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_records_load_empty() {
        let kv = Arc::new(MemoryStore::default());
        kv.set(JOBS_KEY, "garbage").unwrap();
        kv.set(APPLICATIONS_KEY, "[{\"id\": 1}]").unwrap();

        let store = AppStore::load(kv, true);
        assert!(store.jobs().await.is_empty());
        assert!(store.applications().await.is_empty());
    }

    #[tokio::test]
    async fn test_lookups_by_id() {
        let (store, _) = empty_store();
        store.add_job(job("j1", "Backend")).await;
        store.add_application(application("a1", "j1", 70.0)).await;

        assert_eq!(store.job(&JobId("j1".into())).await.unwrap().title, "Backend");
        assert!(store.job(&JobId("j9".into())).await.is_none());
        assert!(store.application(&ApplicationId("a1".into())).await.is_some());
        assert!(store.application(&ApplicationId("a9".into())).await.is_none());
    }
}
