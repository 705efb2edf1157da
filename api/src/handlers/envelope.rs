//! Success envelopes

use axum::Json;
use serde::Serialize;

/// `{"result": "ok", "response": "entity" | "collection", "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub result: &'static str,
    pub response: &'static str,
    pub data: T,
}

/// `{"result": "ok"}`
#[derive(Debug, Serialize)]
pub struct Acknowledged {
    pub result: &'static str,
}

pub fn entity<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        result: "ok",
        response: "entity",
        data,
    })
}

pub fn collection<T: Serialize>(data: Vec<T>) -> Json<Envelope<Vec<T>>> {
    Json(Envelope {
        result: "ok",
        response: "collection",
        data,
    })
}

pub fn acknowledged() -> Json<Acknowledged> {
    Json(Acknowledged { result: "ok" })
}
