//! Ciclo de vida de contactos y consultas
//!
//! Reglas que este controlador hace cumplir:
//! - como máximo un contacto activo (status != closed) por email, tanto en el
//!   alta como al cambiar el email en una actualización
//! - el marcado de lectura ocurre exactamente una vez, en la primera lectura
//!   del detalle de consulta
//! - una única respuesta por contacto, last-write-wins, que fuerza el estado
//!   a resolved

use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::dto::contact_dto::{
    ContactFilters, ContactStatsResponse, CreateContactRequest, InquiryFilters,
    InquiryStatsResponse, StatusBreakdown, SubmitInquiryRequest, UpdateContactRequest,
    UpdateInquiryRequest,
};
use crate::models::contact::{
    Contact, ContactReply, CATEGORY_INQUIRY, CONTACT_CATEGORIES, CONTACT_PRIORITIES,
    CONTACT_STATUSES, PRIORITY_MEDIUM, STATUS_NEW, STATUS_RESOLVED,
};
use crate::models::id::{is_object_id, EntityId};
use crate::repositories::contact_repository::ContactRepository;
use crate::repositories::{ContactGroupField, ContactQuery, ContactStore};
use crate::utils::errors::{invalid_field, validation_error, AppError, AppResult};
use crate::utils::validation::{validate_email, validate_enum, validate_phone};

pub struct ContactController {
    contacts: Arc<dyn ContactStore>,
}

/// Página por defecto del listado de consultas
const DEFAULT_INQUIRY_LIMIT: i64 = 20;

impl ContactController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            contacts: Arc::new(ContactRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn with_store(contacts: Arc<dyn ContactStore>) -> Self {
        Self { contacts }
    }

    /// Alta de contacto desde el panel de personal. subject y message se
    /// derivan del rol/posición/departamento cuando faltan.
    pub async fn create(&self, request: CreateContactRequest) -> AppResult<Contact> {
        request.validate()?;

        let email = normalize_email(&request.email)?;
        check_phone(&request.phone)?;

        let category = request
            .category
            .unwrap_or_else(|| CATEGORY_INQUIRY.to_string());
        validate_enum(&category, CONTACT_CATEGORIES).map_err(|e| invalid_field("category", e))?;

        let priority = request
            .priority
            .unwrap_or_else(|| PRIORITY_MEDIUM.to_string());
        validate_enum(&priority, CONTACT_PRIORITIES).map_err(|e| invalid_field("priority", e))?;

        let related_route = weak_reference("relatedRoute", request.related_route)?;
        let related_bus = weak_reference("relatedBus", request.related_bus)?;

        if self
            .contacts
            .find_active_by_email(&email, None)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateActiveContact(email));
        }

        let subject = match request.subject {
            Some(subject) if !subject.trim().is_empty() => subject,
            _ => {
                let origin = request
                    .role
                    .as_deref()
                    .or(request.position.as_deref())
                    .or(request.department.as_deref())
                    .unwrap_or("Staff");
                format!("{} Contact", origin)
            }
        };
        let message = match request.message {
            Some(message) if !message.trim().is_empty() => message,
            _ => format!("Contact information for {}", request.name),
        };

        let now = chrono::Utc::now();
        let contact = Contact {
            id: EntityId::new(),
            name: request.name,
            email,
            phone: request.phone,
            subject,
            message,
            category,
            priority,
            status: STATUS_NEW.to_string(),
            assigned_to: None,
            related_route,
            related_bus,
            department: request.department,
            position: request.position,
            role: request.role,
            tags: Vec::new(),
            response: None,
            is_read: false,
            read_at: None,
            read_by: None,
            created_at: now,
            updated_at: now,
        };

        self.contacts.insert(&contact).await?;
        Ok(contact)
    }

    /// Alta pública de consulta de cliente: subject y message explícitos
    pub async fn submit_inquiry(&self, request: SubmitInquiryRequest) -> AppResult<Contact> {
        request.validate()?;

        let email = normalize_email(&request.email)?;
        check_phone(&request.phone)?;

        let category = request
            .category
            .unwrap_or_else(|| CATEGORY_INQUIRY.to_string());
        validate_enum(&category, CONTACT_CATEGORIES).map_err(|e| invalid_field("category", e))?;

        let related_route = weak_reference("relatedRoute", request.related_route)?;
        let related_bus = weak_reference("relatedBus", request.related_bus)?;

        if self
            .contacts
            .find_active_by_email(&email, None)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateActiveContact(email));
        }

        let now = chrono::Utc::now();
        let contact = Contact {
            id: EntityId::new(),
            name: request.name,
            email,
            phone: request.phone,
            subject: request.subject,
            message: request.message,
            category,
            priority: PRIORITY_MEDIUM.to_string(),
            status: STATUS_NEW.to_string(),
            assigned_to: None,
            related_route,
            related_bus,
            department: None,
            position: None,
            role: None,
            tags: Vec::new(),
            response: None,
            is_read: false,
            read_at: None,
            read_by: None,
            created_at: now,
            updated_at: now,
        };

        self.contacts.insert(&contact).await?;
        Ok(contact)
    }

    /// Lectura simple por id, sin efecto sobre el estado de lectura
    pub async fn get_by_id(&self, id: &str) -> AppResult<Contact> {
        self.contacts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact not found".to_string()))
    }

    /// Lectura del detalle de consulta: la primera marca isRead y estampa
    /// readAt/readBy; las siguientes no tocan ese estado
    pub async fn get_inquiry(&self, id: &str, reader_id: &str) -> AppResult<Contact> {
        let mut contact = self
            .contacts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))?;

        if !contact.is_read {
            contact.is_read = true;
            contact.read_at = Some(chrono::Utc::now());
            contact.read_by = Some(reader_id.to_string());
            contact.updated_at = chrono::Utc::now();
            self.contacts.update(&contact).await?;
        }

        Ok(contact)
    }

    /// Actualización de contacto: merge de los campos presentes. Si cambia el
    /// email se re-verifica la unicidad activa excluyendo el propio registro.
    pub async fn update(&self, id: &str, request: UpdateContactRequest) -> AppResult<Contact> {
        request.validate()?;

        let mut contact = self
            .contacts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact not found".to_string()))?;

        if let Some(email) = request.email {
            let email = normalize_email(&email)?;
            if self
                .contacts
                .find_active_by_email(&email, Some(id))
                .await?
                .is_some()
            {
                return Err(AppError::DuplicateActiveContact(email));
            }
            contact.email = email;
        }

        if let Some(name) = request.name {
            contact.name = name;
        }
        if let Some(phone) = request.phone {
            if !phone.is_empty() {
                validate_phone(&phone).map_err(|e| invalid_field("phone", e))?;
            }
            contact.phone = Some(phone);
        }
        if let Some(subject) = request.subject {
            contact.subject = subject;
        }
        if let Some(message) = request.message {
            contact.message = message;
        }
        if let Some(category) = request.category {
            validate_enum(&category, CONTACT_CATEGORIES)
                .map_err(|e| invalid_field("category", e))?;
            contact.category = category;
        }
        if let Some(priority) = request.priority {
            validate_enum(&priority, CONTACT_PRIORITIES)
                .map_err(|e| invalid_field("priority", e))?;
            contact.priority = priority;
        }
        if let Some(status) = request.status {
            validate_enum(&status, CONTACT_STATUSES).map_err(|e| invalid_field("status", e))?;
            contact.status = status;
        }
        if let Some(assigned_to) = request.assigned_to {
            contact.assigned_to = weak_reference("assignedTo", Some(assigned_to))?;
        }
        if let Some(related_route) = request.related_route {
            contact.related_route = weak_reference("relatedRoute", Some(related_route))?;
        }
        if let Some(related_bus) = request.related_bus {
            contact.related_bus = weak_reference("relatedBus", Some(related_bus))?;
        }
        if let Some(department) = request.department {
            contact.department = Some(department);
        }
        if let Some(position) = request.position {
            contact.position = Some(position);
        }
        if let Some(role) = request.role {
            contact.role = Some(role);
        }
        if let Some(tags) = request.tags {
            contact.tags = normalize_tags(tags);
        }

        contact.updated_at = chrono::Utc::now();
        self.contacts.update(&contact).await?;
        Ok(contact)
    }

    /// Actualización administrativa de una consulta: solo estado, prioridad,
    /// asignación y tags
    pub async fn update_inquiry(
        &self,
        id: &str,
        request: UpdateInquiryRequest,
    ) -> AppResult<Contact> {
        let mut contact = self
            .contacts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))?;

        if let Some(status) = request.status {
            validate_enum(&status, CONTACT_STATUSES).map_err(|e| invalid_field("status", e))?;
            contact.status = status;
        }
        if let Some(priority) = request.priority {
            validate_enum(&priority, CONTACT_PRIORITIES)
                .map_err(|e| invalid_field("priority", e))?;
            contact.priority = priority;
        }
        if let Some(assigned_to) = request.assigned_to {
            contact.assigned_to = weak_reference("assignedTo", Some(assigned_to))?;
        }
        if let Some(tags) = request.tags {
            contact.tags = normalize_tags(tags);
        }

        contact.updated_at = chrono::Utc::now();
        self.contacts.update(&contact).await?;
        Ok(contact)
    }

    /// Adjuntar la respuesta y forzar el estado a resolved. Solo se conserva
    /// una respuesta: una segunda llamada sobreescribe la primera.
    pub async fn respond(
        &self,
        id: &str,
        message: String,
        responder_id: &str,
    ) -> AppResult<Contact> {
        let mut contact = self
            .contacts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))?;

        contact.response = Some(ContactReply {
            message,
            responded_by: responder_id.to_string(),
            responded_at: chrono::Utc::now(),
        });
        contact.status = STATUS_RESOLVED.to_string();
        contact.updated_at = chrono::Utc::now();

        self.contacts.update(&contact).await?;
        Ok(contact)
    }

    /// Borrado duro incondicional
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.contacts.delete(id).await? {
            return Err(AppError::NotFound("Contact not found".to_string()));
        }
        Ok(())
    }

    /// Listado sin paginar con filtros de departamento, estado y búsqueda
    pub async fn list(&self, filters: ContactFilters) -> AppResult<Vec<Contact>> {
        let query = ContactQuery {
            department: filters.department,
            status: filters.status,
            search: filters.search,
            ..ContactQuery::default()
        };
        self.contacts.list(&query).await
    }

    pub async fn list_by_category(&self, category: &str) -> AppResult<Vec<Contact>> {
        let query = ContactQuery {
            category: Some(category.to_string()),
            ..ContactQuery::default()
        };
        self.contacts.list(&query).await
    }

    /// Contactos urgentes: prioridad high/urgent y estado no cerrado
    pub async fn list_urgent(&self) -> AppResult<Vec<Contact>> {
        let query = ContactQuery {
            urgent_only: true,
            ..ContactQuery::default()
        };
        self.contacts.list(&query).await
    }

    /// Listado paginado de consultas. Devuelve (resultados, total, página,
    /// páginas) con páginas = techo(total/límite).
    pub async fn list_inquiries(
        &self,
        filters: InquiryFilters,
    ) -> AppResult<(Vec<Contact>, i64, i64, i64)> {
        let page = filters.page.unwrap_or(1).max(1);
        let limit = filters.limit.unwrap_or(DEFAULT_INQUIRY_LIMIT).max(1);

        let query = ContactQuery {
            status: filters.status,
            category: filters.category,
            priority: filters.priority,
            skip: Some((page - 1) * limit),
            limit: Some(limit),
            ..ContactQuery::default()
        };

        let inquiries = self.contacts.list(&query).await?;
        let total = self
            .contacts
            .count(&ContactQuery {
                skip: None,
                limit: None,
                ..query
            })
            .await?;
        let pages = (total + limit - 1) / limit;

        Ok((inquiries, total, page, pages))
    }

    /// Estadísticas de contactos: conteos por estado y agrupados por
    /// categoría y prioridad. Sin caché, se recalculan en cada llamada.
    pub async fn contact_stats(&self) -> AppResult<ContactStatsResponse> {
        Ok(ContactStatsResponse {
            total_contacts: self.contacts.count_all().await?,
            status_breakdown: StatusBreakdown {
                new: self.contacts.count_by_status("new").await?,
                in_progress: self.contacts.count_by_status("in-progress").await?,
                resolved: self.contacts.count_by_status("resolved").await?,
                closed: self.contacts.count_by_status("closed").await?,
            },
            category_breakdown: self.contacts.group_count(ContactGroupField::Category).await?,
            priority_breakdown: self.contacts.group_count(ContactGroupField::Priority).await?,
        })
    }

    pub async fn inquiry_stats(&self) -> AppResult<InquiryStatsResponse> {
        Ok(InquiryStatsResponse {
            total_inquiries: self.contacts.count_all().await?,
            new_inquiries: self.contacts.count_by_status("new").await?,
            in_progress_inquiries: self.contacts.count_by_status("in-progress").await?,
            resolved_inquiries: self.contacts.count_by_status("resolved").await?,
            inquiries_by_category: self.contacts.group_count(ContactGroupField::Category).await?,
            inquiries_by_priority: self.contacts.group_count(ContactGroupField::Priority).await?,
        })
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    validate_email(&email).map_err(|e| invalid_field("email", e))?;
    Ok(email)
}

fn check_phone(phone: &Option<String>) -> AppResult<()> {
    if let Some(phone) = phone {
        if !phone.is_empty() {
            validate_phone(phone).map_err(|e| invalid_field("phone", e))?;
        }
    }
    Ok(())
}

// Referencia débil: debe tener forma de id si está presente, pero no se
// comprueba su existencia
fn weak_reference(field: &'static str, value: Option<String>) -> AppResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) if is_object_id(&value) => Ok(Some(value)),
        Some(_) => Err(validation_error(field, "Invalid ID format")),
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryStore;

    fn controller() -> ContactController {
        ContactController::with_store(Arc::new(MemoryStore::new()))
    }

    fn inquiry_request(email: &str) -> SubmitInquiryRequest {
        SubmitInquiryRequest {
            name: "Rider".to_string(),
            email: email.to_string(),
            phone: None,
            subject: "Lost umbrella".to_string(),
            message: "I left my umbrella on the 7:40 departure.".to_string(),
            category: Some("lost-found".to_string()),
            related_route: None,
            related_bus: None,
        }
    }

    fn staff_request(email: &str) -> CreateContactRequest {
        CreateContactRequest {
            name: "Maria Lopez".to_string(),
            email: email.to_string(),
            phone: None,
            subject: None,
            message: None,
            category: None,
            priority: None,
            related_route: None,
            related_bus: None,
            department: Some("Operations".to_string()),
            position: None,
            role: Some("Supervisor".to_string()),
        }
    }

    #[tokio::test]
    async fn test_distinct_emails_create_independently() {
        let controller = controller();
        controller.submit_inquiry(inquiry_request("a@transit.gov")).await.unwrap();
        controller.submit_inquiry(inquiry_request("b@transit.gov")).await.unwrap();

        let stats = controller.contact_stats().await.unwrap();
        assert_eq!(stats.total_contacts, 2);
    }

    #[tokio::test]
    async fn test_duplicate_active_email_is_rejected() {
        let controller = controller();
        controller.submit_inquiry(inquiry_request("a@transit.gov")).await.unwrap();

        let err = controller
            .submit_inquiry(inquiry_request("a@transit.gov"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateActiveContact(_)));
    }

    #[tokio::test]
    async fn test_closed_contact_releases_its_email() {
        let controller = controller();
        let first = controller
            .submit_inquiry(inquiry_request("a@transit.gov"))
            .await
            .unwrap();

        controller
            .update_inquiry(
                first.id.as_str(),
                UpdateInquiryRequest {
                    status: Some("closed".to_string()),
                    ..UpdateInquiryRequest::default()
                },
            )
            .await
            .unwrap();

        // Con el primero cerrado, el mismo email vuelve a estar disponible
        controller.submit_inquiry(inquiry_request("a@transit.gov")).await.unwrap();
    }

    #[tokio::test]
    async fn test_email_is_lowercased() {
        let controller = controller();
        let contact = controller
            .submit_inquiry(inquiry_request("Rider@Transit.GOV"))
            .await
            .unwrap();
        assert_eq!(contact.email, "rider@transit.gov");

        // La unicidad activa es insensible a mayúsculas vía normalización
        let err = controller
            .submit_inquiry(inquiry_request("RIDER@transit.gov"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateActiveContact(_)));
    }

    #[tokio::test]
    async fn test_staff_contact_derives_subject_and_message() {
        let controller = controller();
        let contact = controller.create(staff_request("maria@transit.gov")).await.unwrap();

        assert_eq!(contact.subject, "Supervisor Contact");
        assert_eq!(contact.message, "Contact information for Maria Lopez");
        assert_eq!(contact.status, "new");
        assert_eq!(contact.category, "inquiry");
        assert_eq!(contact.priority, "medium");
        assert!(!contact.is_read);
    }

    #[tokio::test]
    async fn test_staff_subject_falls_back_to_department_then_staff() {
        let controller = controller();

        let mut request = staff_request("ops@transit.gov");
        request.role = None;
        let contact = controller.create(request).await.unwrap();
        assert_eq!(contact.subject, "Operations Contact");

        let mut request = staff_request("plain@transit.gov");
        request.role = None;
        request.department = None;
        let contact = controller.create(request).await.unwrap();
        assert_eq!(contact.subject, "Staff Contact");
    }

    #[tokio::test]
    async fn test_first_read_marks_exactly_once() {
        let controller = controller();
        let contact = controller
            .submit_inquiry(inquiry_request("a@transit.gov"))
            .await
            .unwrap();

        let first = controller
            .get_inquiry(contact.id.as_str(), "507f1f77bcf86cd799439011")
            .await
            .unwrap();
        assert!(first.is_read);
        let read_at = first.read_at.expect("readAt stamped on first read");
        assert_eq!(first.read_by.as_deref(), Some("507f1f77bcf86cd799439011"));

        let second = controller
            .get_inquiry(contact.id.as_str(), "ffffffffffffffffffffffff")
            .await
            .unwrap();
        assert!(second.is_read);
        // La segunda lectura no re-estampa ni cambia el lector
        assert_eq!(second.read_at, Some(read_at));
        assert_eq!(second.read_by.as_deref(), Some("507f1f77bcf86cd799439011"));
    }

    #[tokio::test]
    async fn test_respond_forces_resolved_and_keeps_one_response() {
        let controller = controller();
        let contact = controller
            .submit_inquiry(inquiry_request("a@transit.gov"))
            .await
            .unwrap();

        let responded = controller
            .respond(
                contact.id.as_str(),
                "We found your umbrella at the depot.".to_string(),
                "507f1f77bcf86cd799439011",
            )
            .await
            .unwrap();
        assert_eq!(responded.status, "resolved");

        let responded_again = controller
            .respond(
                contact.id.as_str(),
                "Second reply overwrites the first.".to_string(),
                "ffffffffffffffffffffffff",
            )
            .await
            .unwrap();

        let response = responded_again.response.expect("single response retained");
        assert_eq!(response.message, "Second reply overwrites the first.");
        assert_eq!(response.responded_by, "ffffffffffffffffffffffff");
        assert_eq!(responded_again.status, "resolved");
    }

    #[tokio::test]
    async fn test_update_email_uniqueness_excludes_self() {
        let controller = controller();
        let contact = controller
            .submit_inquiry(inquiry_request("a@transit.gov"))
            .await
            .unwrap();
        controller.submit_inquiry(inquiry_request("b@transit.gov")).await.unwrap();

        // Reafirmar el propio email no es un conflicto
        controller
            .update(
                contact.id.as_str(),
                UpdateContactRequest {
                    email: Some("a@transit.gov".to_string()),
                    ..UpdateContactRequest::default()
                },
            )
            .await
            .unwrap();

        // Tomar el email activo de otro contacto sí lo es
        let err = controller
            .update(
                contact.id.as_str(),
                UpdateContactRequest {
                    email: Some("b@transit.gov".to_string()),
                    ..UpdateContactRequest::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateActiveContact(_)));
    }

    #[tokio::test]
    async fn test_weak_references_are_shape_checked_only() {
        let controller = controller();
        let mut request = inquiry_request("a@transit.gov");
        // Id bien formado que no existe: aceptado (referencia débil)
        request.related_route = Some("507f1f77bcf86cd799439011".to_string());
        let contact = controller.submit_inquiry(request).await.unwrap();
        assert_eq!(
            contact.related_route.as_deref(),
            Some("507f1f77bcf86cd799439011")
        );

        let mut request = inquiry_request("b@transit.gov");
        request.related_bus = Some("not-an-id".to_string());
        let err = controller.submit_inquiry(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_contact_is_not_found() {
        let controller = controller();
        let err = controller
            .delete("cccccccccccccccccccccccc")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_inquiry_pagination_reports_page_count() {
        let controller = controller();
        for i in 0..5 {
            controller
                .submit_inquiry(inquiry_request(&format!("rider{}@transit.gov", i)))
                .await
                .unwrap();
        }

        let (inquiries, total, page, pages) = controller
            .list_inquiries(InquiryFilters {
                page: Some(1),
                limit: Some(2),
                ..InquiryFilters::default()
            })
            .await
            .unwrap();
        assert_eq!(inquiries.len(), 2);
        assert_eq!(total, 5);
        assert_eq!(page, 1);
        assert_eq!(pages, 3);
    }

    #[tokio::test]
    async fn test_stats_group_by_category_and_priority() {
        let controller = controller();
        controller.submit_inquiry(inquiry_request("a@transit.gov")).await.unwrap();
        let mut other = inquiry_request("b@transit.gov");
        other.category = Some("complaint".to_string());
        controller.submit_inquiry(other).await.unwrap();

        let stats = controller.contact_stats().await.unwrap();
        assert_eq!(stats.total_contacts, 2);
        assert_eq!(stats.status_breakdown.new, 2);
        assert_eq!(stats.category_breakdown.get("lost-found"), Some(&1));
        assert_eq!(stats.category_breakdown.get("complaint"), Some(&1));
        assert_eq!(stats.priority_breakdown.get("medium"), Some(&2));
    }

    #[tokio::test]
    async fn test_urgent_listing_excludes_closed() {
        let controller = controller();
        let urgent = controller
            .submit_inquiry(inquiry_request("a@transit.gov"))
            .await
            .unwrap();
        controller
            .update_inquiry(
                urgent.id.as_str(),
                UpdateInquiryRequest {
                    priority: Some("urgent".to_string()),
                    ..UpdateInquiryRequest::default()
                },
            )
            .await
            .unwrap();

        let closed = controller
            .submit_inquiry(inquiry_request("b@transit.gov"))
            .await
            .unwrap();
        controller
            .update_inquiry(
                closed.id.as_str(),
                UpdateInquiryRequest {
                    priority: Some("high".to_string()),
                    status: Some("closed".to_string()),
                    ..UpdateInquiryRequest::default()
                },
            )
            .await
            .unwrap();

        let listed = controller.list_urgent().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, urgent.id);
    }
}
