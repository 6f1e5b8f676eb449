//! Directorio de personal
//!
//! A diferencia de Contact, aquí el email es único sin condición de estado y
//! el conflicto se reporta como tal.

use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::dto::staff_dto::{CreateStaffContactRequest, StaffFilters, UpdateStaffContactRequest};
use crate::models::id::{is_object_id, EntityId};
use crate::models::staff_contact::{
    StaffContact, STAFF_SHIFTS, STAFF_SHIFT_DAY, STAFF_STATUSES, STAFF_STATUS_ACTIVE,
};
use crate::repositories::staff_contact_repository::StaffContactRepository;
use crate::repositories::{StaffContactStore, StaffQuery};
use crate::utils::errors::{invalid_field, validation_error, AppError, AppResult};
use crate::utils::validation::{validate_email, validate_enum, validate_phone};

pub struct StaffController {
    staff: Arc<dyn StaffContactStore>,
}

impl StaffController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            staff: Arc::new(StaffContactRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn with_store(staff: Arc<dyn StaffContactStore>) -> Self {
        Self { staff }
    }

    pub async fn create(&self, request: CreateStaffContactRequest) -> AppResult<StaffContact> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        validate_email(&email).map_err(|e| invalid_field("email", e))?;
        validate_phone(&request.phone).map_err(|e| invalid_field("phone", e))?;

        let shift = request.shift.unwrap_or_else(|| STAFF_SHIFT_DAY.to_string());
        validate_enum(&shift, STAFF_SHIFTS).map_err(|e| invalid_field("shift", e))?;

        let status = request
            .status
            .unwrap_or_else(|| STAFF_STATUS_ACTIVE.to_string());
        validate_enum(&status, STAFF_STATUSES).map_err(|e| invalid_field("status", e))?;

        let buses_assigned = check_bus_references(request.buses_assigned.unwrap_or_default())?;

        if self.staff.find_by_email(&email, None).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Staff contact with email '{}' already exists",
                email
            )));
        }

        let now = chrono::Utc::now();
        let staff = StaffContact {
            id: EntityId::new(),
            name: request.name,
            email,
            phone: request.phone,
            department: request.department,
            position: request.position,
            role: request.role,
            shift,
            status,
            emergency_contact: request.emergency_contact,
            address: request.address,
            buses_assigned,
            hire_date: request.hire_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };

        self.staff.insert(&staff).await?;
        Ok(staff)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<StaffContact> {
        self.staff
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Staff contact not found".to_string()))
    }

    pub async fn list(&self, filters: StaffFilters) -> AppResult<Vec<StaffContact>> {
        let query = StaffQuery {
            department: filters.department,
            status: filters.status,
        };
        self.staff.list(&query).await
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateStaffContactRequest,
    ) -> AppResult<StaffContact> {
        request.validate()?;

        let mut staff = self
            .staff
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Staff contact not found".to_string()))?;

        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            validate_email(&email).map_err(|e| invalid_field("email", e))?;
            if self.staff.find_by_email(&email, Some(id)).await?.is_some() {
                return Err(AppError::Conflict(format!(
                    "Staff contact with email '{}' already exists",
                    email
                )));
            }
            staff.email = email;
        }

        if let Some(name) = request.name {
            staff.name = name;
        }
        if let Some(phone) = request.phone {
            validate_phone(&phone).map_err(|e| invalid_field("phone", e))?;
            staff.phone = phone;
        }
        if let Some(department) = request.department {
            staff.department = department;
        }
        if let Some(position) = request.position {
            staff.position = Some(position);
        }
        if let Some(role) = request.role {
            staff.role = Some(role);
        }
        if let Some(shift) = request.shift {
            validate_enum(&shift, STAFF_SHIFTS).map_err(|e| invalid_field("shift", e))?;
            staff.shift = shift;
        }
        if let Some(status) = request.status {
            validate_enum(&status, STAFF_STATUSES).map_err(|e| invalid_field("status", e))?;
            staff.status = status;
        }
        if let Some(emergency_contact) = request.emergency_contact {
            staff.emergency_contact = Some(emergency_contact);
        }
        if let Some(address) = request.address {
            staff.address = Some(address);
        }
        if let Some(buses_assigned) = request.buses_assigned {
            staff.buses_assigned = check_bus_references(buses_assigned)?;
        }
        if let Some(hire_date) = request.hire_date {
            staff.hire_date = hire_date;
        }

        staff.updated_at = chrono::Utc::now();
        self.staff.update(&staff).await?;
        Ok(staff)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.staff.delete(id).await? {
            return Err(AppError::NotFound("Staff contact not found".to_string()));
        }
        Ok(())
    }
}

// Los buses asignados son referencias débiles con forma de id
fn check_bus_references(buses: Vec<String>) -> AppResult<Vec<String>> {
    for bus in &buses {
        if !is_object_id(bus) {
            return Err(validation_error("busesAssigned", "Invalid ID format"));
        }
    }
    Ok(buses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryStore;

    fn controller() -> StaffController {
        StaffController::with_store(Arc::new(MemoryStore::new()))
    }

    fn create_request(email: &str) -> CreateStaffContactRequest {
        CreateStaffContactRequest {
            name: "Luis Ortega".to_string(),
            email: email.to_string(),
            phone: "+1 555 010 2030".to_string(),
            department: "Maintenance".to_string(),
            position: Some("Mechanic".to_string()),
            role: None,
            shift: None,
            status: None,
            emergency_contact: None,
            address: None,
            buses_assigned: None,
            hire_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let controller = controller();
        let staff = controller
            .create(create_request("Luis@Transit.GOV"))
            .await
            .unwrap();

        assert_eq!(staff.email, "luis@transit.gov");
        assert_eq!(staff.shift, "Day (8:00 AM - 4:00 PM)");
        assert_eq!(staff.status, "active");
    }

    #[tokio::test]
    async fn test_email_is_unique_regardless_of_status() {
        let controller = controller();
        let first = controller
            .create(create_request("luis@transit.gov"))
            .await
            .unwrap();

        // Incluso con el registro inactivo el email sigue reservado
        controller
            .update(
                first.id.as_str(),
                UpdateStaffContactRequest {
                    status: Some("terminated".to_string()),
                    ..UpdateStaffContactRequest::default()
                },
            )
            .await
            .unwrap();

        let err = controller
            .create(create_request("luis@transit.gov"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_assigned_buses_must_look_like_ids() {
        let controller = controller();
        let mut request = create_request("luis@transit.gov");
        request.buses_assigned = Some(vec!["BUS-001".to_string()]);
        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut request = create_request("ana@transit.gov");
        request.buses_assigned = Some(vec!["507f1f77bcf86cd799439011".to_string()]);
        let staff = controller.create(request).await.unwrap();
        assert_eq!(staff.buses_assigned.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_shift_is_rejected() {
        let controller = controller();
        let mut request = create_request("luis@transit.gov");
        request.shift = Some("Graveyard".to_string());
        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
