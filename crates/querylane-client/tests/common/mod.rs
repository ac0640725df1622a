//! Shared fixtures for integration tests.
#![allow(dead_code)]

use querylane_client::{ApiContext, ApiResource, ApiSet, ContextOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: String,
    pub budget: i64,
}

impl ApiResource for Campaign {
    const RESOURCE: &'static str = "campaign";

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn campaign(id: &str, name: &str, status: &str, budget: i64) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
        status: status.to_string(),
        budget,
    }
}

/// A campaigns collection wired to the given mock server.
pub fn campaigns_set(server_uri: &str) -> ApiSet<Campaign> {
    campaigns_set_with(ContextOptions::new(server_uri))
}

pub fn campaigns_set_with(options: ContextOptions) -> ApiSet<Campaign> {
    let context = ApiContext::new(options).expect("context should build");
    context
        .endpoint::<Campaign>()
        .path("/campaigns")
        .build()
        .expect("endpoint should build")
}
