//! Product asset loading for the viewer session.
//!
//! Submits the glTF load, polls it to completion, then attaches the product
//! to the scene or records the failure.

/// Load submission, completion polling and model attachment.
pub mod model_loader;

/// Material normalisation applied to every attached product.
pub mod material_override;
