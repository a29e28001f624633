//! # Store Rating Models
//!
//! Database entities, request DTOs with their validation rules, and response
//! payloads.
//!
//! # Modules
//!
//! - [`users`]: users, the caller identity, account DTOs
//! - [`stores`]: stores and their rating aggregates
//! - [`ratings`]: ratings and the owner's view of them
//! - [`auth`]: login/register payloads and dashboard statistics
//! - [`listing`]: sort allow-lists and average formatting
//! - [`validation`]: custom field validators

pub mod auth;
pub mod listing;
pub mod ratings;
pub mod stores;
pub mod users;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthResponse, DashboardStats, HealthResponse, LogoutResponse, ProfileResponse};
pub use listing::{
    AdminStoreSortField, OwnerRatingSortField, SortField, SortOrder, UserSortField,
    UserStoreSortField, format_average, order_by_clause, resolve_sort, search_pattern,
};
pub use ratings::{
    OwnerRating, OwnerRatingListParams, OwnerRatingsResponse, Rating, RatingResponse,
    SubmitRatingRequest,
};
pub use stores::{
    AdminStore, AdminStoresResponse, CreateStoreRequest, OwnedStore, OwnerDashboardResponse,
    Store, StoreListParams, StoreRatingSummary, StoreResponse, UserStore, UserStoresResponse,
};
pub use users::{
    ChangePasswordRequest, CreateUserRequest, CurrentUser, LoginRequest, RegisterRequest, User,
    UserCredentials, UserDetail, UserDetailResponse, UserListParams, UserResponse, UsersResponse,
};
