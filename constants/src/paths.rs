/// Viewer page opened by the launcher, relative to the host page.
pub const VIEWER_PAGE: &str = "viewer.html";

/// Browsing context target for the launcher.
pub const LAUNCH_TARGET: &str = "_blank";

/// Query parameter carrying the URL-encoded asset path.
pub const MODEL_PARAM: &str = "model";

/// Query parameter carrying the product id.
pub const MODEL_NUM_PARAM: &str = "modelNum";

/// Asset server root. Product paths are resolved against the page directory.
pub const ASSET_ROOT: &str = ".";

/// Attribute read by the launcher's click handler registration.
pub const PRODUCT_ID_ATTRIBUTE: &str = "data-product-id";
