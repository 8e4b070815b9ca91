//! Contacts instantiation of the generic service.

use std::sync::Arc;

use crate::context::Context;
use crate::data::MemoryRepository;
use crate::di::FromRef;
use crate::mapper::JsonMapper;
use crate::models::{Contact, ContactDto, ContactEdit, NewContact};
use crate::repositories::ContactsUnitOfWork;
use crate::services::{BusinessService, CrudTypes};

/// Type bundle for contacts.
pub enum ContactTypes {}

impl CrudTypes for ContactTypes {
    type Key = u64;
    type Entity = Contact;
    type Dto = ContactDto;
    type AddDto = NewContact;
    type EditDto = ContactEdit;
}

/// CRUD over contacts.
pub type ContactService =
    BusinessService<ContactTypes, ContactsUnitOfWork, MemoryRepository<Contact, u64>, JsonMapper>;

impl FromRef<Context> for ContactService {
    fn from_ref(ctx: &Context) -> Self {
        BusinessService::new(Arc::clone(&ctx.store), |uow| &uow.contacts, ctx.mapper)
    }
}
