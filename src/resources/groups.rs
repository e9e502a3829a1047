//! Product group resource implementation.
//!
//! Groups bundle products on the storefront.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, HttpClient, HttpError, QueryParams};

use super::{is_zero, list_query, resource_path, Pagination, Patch};

const GROUPS_PATH: &str = "/groups";

/// A product group.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Group {
    /// The unique identifier of the group.
    /// Read-only field.
    pub id: String,
    /// The name shown on the storefront.
    pub name: String,
    /// A short description of the group.
    pub description: Option<String>,
    /// The URL of the group image.
    pub image_url: Option<String>,
    /// Position on the storefront; lower comes first.
    pub display_order: i64,
    /// Whether the group is shown on the storefront.
    pub is_active: bool,
    /// The number of products in the group.
    /// Read-only field.
    pub product_count: i64,
    /// When the group was created.
    /// Read-only field.
    pub created_at: Option<DateTime<Utc>>,
    /// When the group was last updated.
    /// Read-only field.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A product listed inside a group.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GroupProductMini {
    /// The identifier of the product.
    pub id: String,
    /// The name of the product.
    pub name: String,
    /// The unit price, in cents.
    pub price_in_cents: i64,
    /// Whether the product can be bought.
    pub is_active: bool,
    /// The number of units in stock.
    pub stock_quantity: i64,
    /// When the product was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// A group together with the products it contains.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GroupDetail {
    /// The group itself.
    #[serde(flatten)]
    pub group: Group,
    /// The products in the group.
    #[serde(default)]
    pub products: Vec<GroupProductMini>,
}

/// Filters for [`GroupsService::list`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ListGroupsParams {
    /// The page to fetch. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    /// Groups per page. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
    /// Only return active (`true`) or inactive (`false`) groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Only return groups whose name contains this text.
    pub search: String,
}

/// Payload of [`GroupsService::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListGroupsResponse {
    /// The groups on this page.
    pub groups: Vec<Group>,
    /// Where this page sits in the full list.
    pub pagination: Pagination,
}

/// Payload of [`GroupsService::create`] and [`GroupsService::update`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GroupResponse {
    /// The group.
    pub group: Group,
}

/// Payload of [`GroupsService::get`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GetGroupResponse {
    /// The group with its products.
    pub group: GroupDetail,
}

/// Payload of [`GroupsService::delete`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DeleteGroupResponse {
    /// Whether the group was deleted.
    pub deleted: bool,
    /// The identifier of the deleted group.
    pub group_id: Option<String>,
}

/// Body of [`GroupsService::create`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CreateGroupRequest {
    /// The name shown on the storefront.
    pub name: String,
    /// A short description of the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The URL of the group image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Position on the storefront; lower comes first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    /// Whether the group is shown right away.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body of [`GroupsService::update`]. Only set fields are sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct UpdateGroupRequest {
    /// The name shown on the storefront.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    /// A short description of the group.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub description: Patch<String>,
    /// The URL of the group image.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub image_url: Patch<String>,
    /// Position on the storefront; lower comes first.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub display_order: Patch<i64>,
    /// Whether the group is shown on the storefront.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub is_active: Patch<bool>,
}

/// Product group operations.
#[derive(Debug, Clone, Copy)]
pub struct GroupsService<'a> {
    client: &'a HttpClient,
}

impl<'a> GroupsService<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists groups, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn list(
        &self,
        params: &ListGroupsParams,
    ) -> Result<ApiResponse<ListGroupsResponse>, HttpError> {
        let query = list_query(params)?;
        self.client.get(GROUPS_PATH, query).await
    }

    /// Fetches a group with its products.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get(&self, group_id: &str) -> Result<ApiResponse<GetGroupResponse>, HttpError> {
        self.client
            .get(&resource_path(GROUPS_PATH, group_id), QueryParams::new())
            .await
    }

    /// Creates a group.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn create(
        &self,
        request: &CreateGroupRequest,
    ) -> Result<ApiResponse<GroupResponse>, HttpError> {
        self.client.post(GROUPS_PATH, request).await
    }

    /// Updates the fields set in `request`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn update(
        &self,
        group_id: &str,
        request: &UpdateGroupRequest,
    ) -> Result<ApiResponse<GroupResponse>, HttpError> {
        self.client
            .patch(&resource_path(GROUPS_PATH, group_id), request)
            .await
    }

    /// Deletes a group. Its products are kept.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn delete(
        &self,
        group_id: &str,
    ) -> Result<ApiResponse<DeleteGroupResponse>, HttpError> {
        self.client
            .delete(&resource_path(GROUPS_PATH, group_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_detail_flattens_group_fields() {
        let payload: GetGroupResponse = serde_json::from_value(json!({
            "group": {
                "id": "grp_1",
                "name": "Game Keys",
                "display_order": 2,
                "is_active": true,
                "product_count": 1,
                "image_url": null,
                "products": [
                    {"id": "prod_1", "name": "Steam Key", "price_in_cents": 999, "is_active": true, "stock_quantity": 12}
                ]
            }
        }))
        .unwrap();

        assert_eq!(payload.group.group.name, "Game Keys");
        assert_eq!(payload.group.group.display_order, 2);
        assert!(payload.group.group.image_url.is_none());
        assert_eq!(payload.group.products.len(), 1);
        assert_eq!(payload.group.products[0].stock_quantity, 12);
    }

    #[test]
    fn test_update_can_clear_image() {
        let request = UpdateGroupRequest {
            image_url: Patch::Null,
            display_order: Patch::Value(0),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"image_url": null, "display_order": 0})
        );
    }

    #[test]
    fn test_create_request_minimal() {
        let request = CreateGroupRequest {
            name: "Bundles".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"name": "Bundles"}));
    }
}
