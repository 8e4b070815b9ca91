//! Shared fakes for service tests: a scripted repository and unit of work,
//! a counting mapper, and a tracing layer that captures log events.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bizsvc::cancel::{Cancellation, CancellationSource};
use bizsvc::data::{Repository, UnitOfWork};
use bizsvc::dto::{Dto, Entity};
use bizsvc::error::AppError;
use bizsvc::mapper::{JsonMapper, Mapper};
use bizsvc::services::{BusinessService, CrudTypes};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

// ============================================================================
// Records
// ============================================================================

pub trait Key:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<K> Key for K where
    K: Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FakeEntity<K> {
    #[serde(default)]
    pub id: K,
    pub name: Option<String>,
}

impl<K> Entity<K> for FakeEntity<K> {
    fn id(&self) -> &K {
        &self.id
    }

    fn set_id(&mut self, id: K) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FakeDto<K> {
    pub id: K,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FakeAddDto {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FakeEditDto<K> {
    pub id: K,
    pub name: Option<String>,
}

impl<K> Dto<K> for FakeEditDto<K> {
    fn id(&self) -> &K {
        &self.id
    }
}

pub struct FakeTypes<K>(PhantomData<fn() -> K>);

impl<K: Key> CrudTypes for FakeTypes<K> {
    type Key = K;
    type Entity = FakeEntity<K>;
    type Dto = FakeDto<K>;
    type AddDto = FakeAddDto;
    type EditDto = FakeEditDto<K>;
}

pub fn entity<K>(id: K, name: &str) -> FakeEntity<K> {
    FakeEntity {
        id,
        name: Some(name.to_string()),
    }
}

pub fn dto<K>(id: K, name: &str) -> FakeDto<K> {
    FakeDto {
        id,
        name: Some(name.to_string()),
    }
}

// ============================================================================
// Scripted data layer
// ============================================================================

/// A repository interaction, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call<K> {
    Get(K),
    List,
    Insert(FakeEntity<K>),
    Update(FakeEntity<K>),
    Delete(K),
}

/// Repository answering from fixed results and recording every call.
pub struct ScriptedRepository<K> {
    pub calls: Mutex<Vec<Call<K>>>,
    /// Returned by `get` for any key.
    pub stored: Option<FakeEntity<K>>,
    /// Returned by `list`.
    pub rows: Vec<FakeEntity<K>>,
    /// Key given to inserted entities.
    pub assign_id: K,
    /// Makes every mutation fail with this persistence message.
    pub fail_mutations: Option<String>,
    /// Fired from inside `insert`, as if the caller gave up mid-call.
    pub cancel_on_insert: Option<Arc<CancellationSource>>,
}

impl<K: Key> ScriptedRepository<K> {
    pub fn calls(&self) -> Vec<Call<K>> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call<K>) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }

    fn mutation(&self, call: Call<K>) -> Result<(), AppError> {
        self.record(call)?;
        match &self.fail_mutations {
            Some(message) => Err(AppError::Persistence(message.clone())),
            None => Ok(()),
        }
    }
}

impl<K: Key> Default for ScriptedRepository<K> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            stored: None,
            rows: Vec::new(),
            assign_id: K::default(),
            fail_mutations: None,
            cancel_on_insert: None,
        }
    }
}

#[async_trait]
impl<K: Key> Repository<FakeEntity<K>, K> for ScriptedRepository<K> {
    async fn get(&self, id: &K, _cancel: &Cancellation) -> Result<Option<FakeEntity<K>>, AppError> {
        self.record(Call::Get(id.clone()))?;
        Ok(self.stored.clone())
    }

    async fn list(&self, _cancel: &Cancellation) -> Result<Vec<FakeEntity<K>>, AppError> {
        self.record(Call::List)?;
        Ok(self.rows.clone())
    }

    async fn insert(
        &self,
        mut entity: FakeEntity<K>,
        _cancel: &Cancellation,
    ) -> Result<FakeEntity<K>, AppError> {
        self.mutation(Call::Insert(entity.clone()))?;
        if let Some(source) = &self.cancel_on_insert {
            source.cancel();
        }
        entity.id = self.assign_id.clone();
        Ok(entity)
    }

    async fn update(
        &self,
        entity: FakeEntity<K>,
        _cancel: &Cancellation,
    ) -> Result<FakeEntity<K>, AppError> {
        self.mutation(Call::Update(entity.clone()))?;
        Ok(entity)
    }

    async fn delete(&self, id: &K, _cancel: &Cancellation) -> Result<(), AppError> {
        self.mutation(Call::Delete(id.clone()))
    }
}

/// Unit of work returning a fixed affected-row count.
pub struct ScriptedUnitOfWork<K> {
    pub repository: ScriptedRepository<K>,
    pub affected: usize,
    pub fail_commit: Option<String>,
    pub commits: AtomicUsize,
    pub scopes: AtomicUsize,
    pub rollbacks: AtomicUsize,
}

impl<K: Key> ScriptedUnitOfWork<K> {
    pub fn new(repository: ScriptedRepository<K>) -> Self {
        Self {
            repository,
            affected: 1,
            fail_commit: None,
            commits: AtomicUsize::new(0),
            scopes: AtomicUsize::new(0),
            rollbacks: AtomicUsize::new(0),
        }
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn scopes(&self) -> usize {
        self.scopes.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<K: Key> UnitOfWork for ScriptedUnitOfWork<K> {
    type Scope<'a> = ();

    async fn begin<'a>(&'a self, _cancel: &Cancellation) -> Result<Self::Scope<'a>, AppError> {
        self.scopes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn commit(&self, _cancel: &Cancellation) -> Result<usize, AppError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        match &self.fail_commit {
            Some(message) => Err(AppError::Persistence(message.clone())),
            None => Ok(self.affected),
        }
    }

    async fn rollback(&self) -> Result<(), AppError> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Mapper
// ============================================================================

/// [`JsonMapper`] that counts how often each operation ran.
#[derive(Clone, Default)]
pub struct CountingMapper {
    pub maps: Arc<AtomicUsize>,
    pub merges: Arc<AtomicUsize>,
}

impl CountingMapper {
    pub fn total(&self) -> usize {
        self.maps.load(Ordering::SeqCst) + self.merges.load(Ordering::SeqCst)
    }
}

impl Mapper for CountingMapper {
    fn map<S, D>(&self, source: &S) -> Result<D, AppError>
    where
        S: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        self.maps.fetch_add(1, Ordering::SeqCst);
        JsonMapper.map(source)
    }

    fn map_into<'d, S, D>(&self, source: &S, destination: &'d mut D) -> Result<&'d mut D, AppError>
    where
        S: Serialize + ?Sized,
        D: Serialize + DeserializeOwned,
    {
        self.merges.fetch_add(1, Ordering::SeqCst);
        JsonMapper.map_into(source, destination)
    }
}

// ============================================================================
// Service wiring
// ============================================================================

pub type FakeService<K> =
    BusinessService<FakeTypes<K>, ScriptedUnitOfWork<K>, ScriptedRepository<K>, CountingMapper>;

pub struct Harness<K> {
    pub service: FakeService<K>,
    pub uow: Arc<ScriptedUnitOfWork<K>>,
    pub mapper: CountingMapper,
}

impl<K: Key> Harness<K> {
    pub fn new(uow: ScriptedUnitOfWork<K>) -> Self {
        let uow = Arc::new(uow);
        let mapper = CountingMapper::default();
        let service: FakeService<K> =
            BusinessService::new(Arc::clone(&uow), |uow| &uow.repository, mapper.clone());
        Self {
            service,
            uow,
            mapper,
        }
    }

    pub fn with_repository(repository: ScriptedRepository<K>) -> Self {
        Self::new(ScriptedUnitOfWork::new(repository))
    }

    pub fn calls(&self) -> Vec<Call<K>> {
        self.uow.repository.calls()
    }
}

// ============================================================================
// Log capture
// ============================================================================

#[derive(Debug, Clone)]
pub struct Captured {
    pub level: Level,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

/// Collects every event emitted while its guard is alive.
#[derive(Clone, Default)]
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureLayer {
    /// Installs the layer as this thread's default subscriber.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let layer = Self::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (layer, guard)
    }

    pub fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.events()
            .into_iter()
            .map(|e| (e.level, e.message))
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.record(field, format!("{:?}", value));
    }
}

impl FieldVisitor {
    fn record(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}
