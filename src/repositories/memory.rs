//! Almacén en memoria para tests
//!
//! Implementa los mismos traits que los repositorios PostgreSQL con el mismo
//! comportamiento de filtrado y ordenación, de modo que los controladores se
//! prueban sin base de datos.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::bus::Bus;
use crate::models::contact::Contact;
use crate::models::route::Route;
use crate::models::schedule::Schedule;
use crate::models::staff_contact::StaffContact;
use crate::models::user::User;
use crate::repositories::{
    BusQuery, BusStore, ContactGroupField, ContactQuery, ContactStore, RouteQuery, RouteStore,
    ScheduleQuery, ScheduleStore, StaffContactStore, StaffQuery, UserStore,
};
use crate::utils::errors::AppResult;

#[derive(Default)]
pub struct MemoryStore {
    contacts: RwLock<HashMap<String, Contact>>,
    buses: RwLock<HashMap<String, Bus>>,
    routes: RwLock<HashMap<String, Route>>,
    schedules: RwLock<HashMap<String, Schedule>>,
    staff: RwLock<HashMap<String, StaffContact>>,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_contact(contact: &Contact, query: &ContactQuery) -> bool {
    if let Some(status) = &query.status {
        if &contact.status != status {
            return false;
        }
    }
    if let Some(category) = &query.category {
        if &contact.category != category {
            return false;
        }
    }
    if let Some(priority) = &query.priority {
        if &contact.priority != priority {
            return false;
        }
    }
    if let Some(department) = &query.department {
        match &contact.department {
            Some(value) if contains_ci(value, department) => {}
            _ => return false,
        }
    }
    if let Some(search) = &query.search {
        let position = contact.position.as_deref().unwrap_or("");
        if !contains_ci(&contact.name, search)
            && !contains_ci(&contact.email, search)
            && !contains_ci(position, search)
        {
            return false;
        }
    }
    if query.urgent_only {
        let urgent = contact.priority == "high" || contact.priority == "urgent";
        if !urgent || !contact.is_active() {
            return false;
        }
    }
    true
}

fn paginate<T>(mut items: Vec<T>, skip: Option<i64>, limit: Option<i64>) -> Vec<T> {
    if let Some(skip) = skip {
        let skip = skip.max(0) as usize;
        items = items.into_iter().skip(skip).collect();
    }
    if let Some(limit) = limit {
        let limit = limit.max(0) as usize;
        items.truncate(limit);
    }
    items
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn insert(&self, contact: &Contact) -> AppResult<()> {
        self.contacts
            .write()
            .await
            .insert(contact.id.to_string(), contact.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Contact>> {
        Ok(self.contacts.read().await.get(id).cloned())
    }

    async fn find_active_by_email(
        &self,
        email: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts
            .values()
            .find(|c| {
                c.email == email
                    && c.is_active()
                    && exclude_id.map_or(true, |id| c.id.as_str() != id)
            })
            .cloned())
    }

    async fn list(&self, query: &ContactQuery) -> AppResult<Vec<Contact>> {
        let contacts = self.contacts.read().await;
        let mut matched: Vec<Contact> = contacts
            .values()
            .filter(|c| matches_contact(c, query))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matched, query.skip, query.limit))
    }

    async fn count(&self, query: &ContactQuery) -> AppResult<i64> {
        let contacts = self.contacts.read().await;
        Ok(contacts.values().filter(|c| matches_contact(c, query)).count() as i64)
    }

    async fn update(&self, contact: &Contact) -> AppResult<()> {
        self.contacts
            .write()
            .await
            .insert(contact.id.to_string(), contact.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        Ok(self.contacts.write().await.remove(id).is_some())
    }

    async fn count_all(&self) -> AppResult<i64> {
        Ok(self.contacts.read().await.len() as i64)
    }

    async fn count_by_status(&self, status: &str) -> AppResult<i64> {
        let contacts = self.contacts.read().await;
        Ok(contacts.values().filter(|c| c.status == status).count() as i64)
    }

    async fn group_count(&self, field: ContactGroupField) -> AppResult<HashMap<String, i64>> {
        let contacts = self.contacts.read().await;
        let mut counts = HashMap::new();
        for contact in contacts.values() {
            let key = match field {
                ContactGroupField::Category => contact.category.clone(),
                ContactGroupField::Priority => contact.priority.clone(),
            };
            *counts.entry(key).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

fn matches_bus(bus: &Bus, query: &BusQuery) -> bool {
    if let Some(status) = &query.status {
        if &bus.status != status {
            return false;
        }
    }
    if let Some(route) = &query.route {
        match &bus.route {
            Some(assignment) if assignment.as_str() == route => {}
            _ => return false,
        }
    }
    true
}

#[async_trait]
impl BusStore for MemoryStore {
    async fn insert(&self, bus: &Bus) -> AppResult<()> {
        self.buses.write().await.insert(bus.id.to_string(), bus.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Bus>> {
        Ok(self.buses.read().await.get(id).cloned())
    }

    async fn find_by_number(
        &self,
        bus_number: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<Bus>> {
        let buses = self.buses.read().await;
        Ok(buses
            .values()
            .find(|b| {
                b.bus_number.eq_ignore_ascii_case(bus_number)
                    && exclude_id.map_or(true, |id| b.id.as_str() != id)
            })
            .cloned())
    }

    async fn list(&self, query: &BusQuery) -> AppResult<Vec<Bus>> {
        let buses = self.buses.read().await;
        let mut matched: Vec<Bus> = buses
            .values()
            .filter(|b| matches_bus(b, query))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matched, query.skip, query.limit))
    }

    async fn count(&self, query: &BusQuery) -> AppResult<i64> {
        let buses = self.buses.read().await;
        Ok(buses.values().filter(|b| matches_bus(b, query)).count() as i64)
    }

    async fn update(&self, bus: &Bus) -> AppResult<()> {
        self.buses.write().await.insert(bus.id.to_string(), bus.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<Option<Bus>> {
        Ok(self.buses.write().await.remove(id))
    }

    async fn count_all(&self) -> AppResult<i64> {
        Ok(self.buses.read().await.len() as i64)
    }

    async fn count_by_status(&self, status: &str) -> AppResult<i64> {
        let buses = self.buses.read().await;
        Ok(buses.values().filter(|b| b.status == status).count() as i64)
    }

    async fn fleet_totals(&self) -> AppResult<(i64, f64, f64)> {
        let buses = self.buses.read().await;
        let total_capacity: i64 = buses.values().map(|b| b.capacity as i64).sum();
        let total_mileage: f64 = buses.values().map(|b| b.mileage).sum();
        let average_mileage = if buses.is_empty() {
            0.0
        } else {
            total_mileage / buses.len() as f64
        };
        Ok((total_capacity, average_mileage, total_mileage))
    }

    async fn group_count_by_type(&self) -> AppResult<HashMap<String, i64>> {
        let buses = self.buses.read().await;
        let mut counts = HashMap::new();
        for bus in buses.values() {
            *counts.entry(bus.bus_type.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[async_trait]
impl RouteStore for MemoryStore {
    async fn insert(&self, route: &Route) -> AppResult<()> {
        self.routes
            .write()
            .await
            .insert(route.id.to_string(), route.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Route>> {
        Ok(self.routes.read().await.get(id).cloned())
    }

    async fn find_by_number(
        &self,
        route_number: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<Route>> {
        let routes = self.routes.read().await;
        Ok(routes
            .values()
            .find(|r| {
                r.route_number.eq_ignore_ascii_case(route_number)
                    && exclude_id.map_or(true, |id| r.id.as_str() != id)
            })
            .cloned())
    }

    async fn list(&self, query: &RouteQuery) -> AppResult<Vec<Route>> {
        let routes = self.routes.read().await;
        let mut matched: Vec<Route> = routes
            .values()
            .filter(|r| query.status.as_ref().map_or(true, |s| &r.status == s))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn update(&self, route: &Route) -> AppResult<()> {
        self.routes
            .write()
            .await
            .insert(route.id.to_string(), route.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        Ok(self.routes.write().await.remove(id).is_some())
    }

    async fn count_all(&self) -> AppResult<i64> {
        Ok(self.routes.read().await.len() as i64)
    }
}

fn matches_schedule(schedule: &Schedule, query: &ScheduleQuery) -> bool {
    if let Some(route) = &query.route {
        if schedule.route.as_str() != route {
            return false;
        }
    }
    if let Some(bus) = &query.bus {
        if schedule.bus.as_str() != bus {
            return false;
        }
    }
    if let Some(status) = &query.status {
        if &schedule.status != status {
            return false;
        }
    }
    true
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn insert(&self, schedule: &Schedule) -> AppResult<()> {
        self.schedules
            .write()
            .await
            .insert(schedule.id.to_string(), schedule.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Schedule>> {
        Ok(self.schedules.read().await.get(id).cloned())
    }

    async fn list(&self, query: &ScheduleQuery) -> AppResult<Vec<Schedule>> {
        let schedules = self.schedules.read().await;
        let mut matched: Vec<Schedule> = schedules
            .values()
            .filter(|s| matches_schedule(s, query))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.departure_time.cmp(&a.departure_time));
        Ok(paginate(matched, query.skip, query.limit))
    }

    async fn count(&self, query: &ScheduleQuery) -> AppResult<i64> {
        let schedules = self.schedules.read().await;
        Ok(schedules
            .values()
            .filter(|s| matches_schedule(s, query))
            .count() as i64)
    }

    async fn update(&self, schedule: &Schedule) -> AppResult<()> {
        self.schedules
            .write()
            .await
            .insert(schedule.id.to_string(), schedule.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        Ok(self.schedules.write().await.remove(id).is_some())
    }

    async fn count_all(&self) -> AppResult<i64> {
        Ok(self.schedules.read().await.len() as i64)
    }
}

#[async_trait]
impl StaffContactStore for MemoryStore {
    async fn insert(&self, staff: &StaffContact) -> AppResult<()> {
        self.staff
            .write()
            .await
            .insert(staff.id.to_string(), staff.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<StaffContact>> {
        Ok(self.staff.read().await.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<StaffContact>> {
        let staff = self.staff.read().await;
        Ok(staff
            .values()
            .find(|s| s.email == email && exclude_id.map_or(true, |id| s.id.as_str() != id))
            .cloned())
    }

    async fn list(&self, query: &StaffQuery) -> AppResult<Vec<StaffContact>> {
        let staff = self.staff.read().await;
        let mut matched: Vec<StaffContact> = staff
            .values()
            .filter(|s| {
                query
                    .department
                    .as_ref()
                    .map_or(true, |d| contains_ci(&s.department, d))
                    && query.status.as_ref().map_or(true, |st| &s.status == st)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn update(&self, staff: &StaffContact) -> AppResult<()> {
        self.staff
            .write()
            .await
            .insert(staff.id.to_string(), staff.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        Ok(self.staff.write().await.remove(id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &User) -> AppResult<()> {
        self.users.write().await.insert(user.id.to_string(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}
