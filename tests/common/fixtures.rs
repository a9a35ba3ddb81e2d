//! Test fixtures and data factories
//!
//! Factories produce the JSON the backend sends, so tests exercise the
//! real deserialization path.

use serde_json::{Value, json};

/// Factory for user payloads
pub struct UserFactory;

impl UserFactory {
    pub fn staff() -> Value {
        json!({
            "id": "u-staff",
            "email": "admin@pergaminos.com",
            "name": "Admin Pergaminos",
            "role": "staff",
            "company_id": null,
            "is_active": true,
            "created_at": "2025-01-10T08:00:00"
        })
    }

    pub fn client(company_id: &str) -> Value {
        json!({
            "id": "u-client",
            "email": "cliente@notaria.com",
            "name": "Cliente",
            "role": "client",
            "company_id": company_id,
            "is_active": true,
            "created_at": "2025-01-11T08:00:00"
        })
    }

    /// `POST /auth/login` response
    pub fn token_response(token: &str) -> Value {
        json!({
            "access_token": token,
            "token_type": "bearer",
            "user": Self::staff()
        })
    }
}

/// Factory for project payloads
pub struct ProjectFactory;

impl ProjectFactory {
    pub fn create(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": "Escrituras 1890-1910",
            "company_id": "c1",
            "status": "active",
            "created_at": "2025-02-01T12:00:00",
            "created_by": "u-staff"
        })
    }
}

/// Factory for document payloads
pub struct DocumentFactory;

impl DocumentFactory {
    pub fn create(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "filename": format!("{id}.pdf"),
            "original_filename": name,
            "project_id": "p1",
            "status": "uploaded",
            "created_at": "2025-02-02T09:00:00"
        })
    }

    /// Document with a display order and creation day in February 2025
    pub fn ordered(id: &str, name: &str, order: u32, day: u32) -> Value {
        let mut doc = Self::create(id, name);
        doc["display_order"] = json!(order);
        doc["created_at"] = json!(format!("2025-02-{day:02}T09:00:00"));
        doc
    }

    /// `b.pdf`, `a.pdf`, `c.pdf` in listing order
    pub fn unsorted_three() -> Value {
        json!([
            Self::ordered("d1", "b.pdf", 1, 3),
            Self::ordered("d2", "a.pdf", 2, 1),
            Self::ordered("d3", "c.pdf", 3, 2),
        ])
    }
}

/// Status payload as reported by the processing endpoints
pub fn task_status(status: &str, progress: u32) -> Value {
    json!({ "status": status, "progress": progress })
}
