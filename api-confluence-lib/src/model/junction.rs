use crate::store::define_record;

define_record! {
    /// Links a [`Release`](super::Release) to a [`WebInterface`](super::WebInterface) it exposes.
    ReleaseWebInterfaceJunction => "ReleaseWebInterfaceJunction", indexed [source_id] {
        id: String,
        /// The release id.
        source_id: String,
        /// The web interface id.
        target_id: String,
    }
}

impl ReleaseWebInterfaceJunction {
    #[must_use]
    pub fn new(source_id: &str, target_id: &str) -> Self {
        Self {
            id: format!("{source_id}:{target_id}"),
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
        }
    }
}
