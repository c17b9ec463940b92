//! Fetch-or-create of the remote profile on sign-in.

use crate::error::StoreError;
use crate::models::{Identity, RemoteProfile};
use crate::store::ProfileStore;

/// Load the profile for `identity`, creating an empty one on first sign-in.
/// The created document is returned as-is rather than re-fetched.
pub async fn fetch_or_create(
    store: &dyn ProfileStore,
    identity: &Identity,
) -> Result<RemoteProfile, StoreError> {
    if let Some(profile) = store.get(&identity.uid).await? {
        tracing::debug!(uid = %identity.uid, "loaded existing profile");
        return Ok(profile);
    }

    let profile = RemoteProfile::for_identity(identity);
    store.create(&identity.uid, &profile).await?;
    tracing::info!(uid = %identity.uid, "created profile");
    Ok(profile)
}
