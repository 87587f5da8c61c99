//! Image service calls.

use super::service::{resource_from_value, Resource};
use crate::cloud::ApiClient;
use anyhow::Result;

pub async fn list_images(client: &ApiClient) -> Result<Vec<Resource>> {
    let response = client.get(&client.image_url("images")).await?;
    Ok(response
        .get("images")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .map(|v| resource_from_value(v, "name"))
                .collect()
        })
        .unwrap_or_default())
}

pub async fn delete_image(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.image_url(&format!("images/{}", id)))
        .await?;
    Ok(())
}
