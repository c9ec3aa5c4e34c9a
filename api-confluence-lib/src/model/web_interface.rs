use crate::store::define_record;

define_record! {
    /// A member of a platform interface, for example `Document#createElement`.
    WebInterface => "WebInterface" {
        id: String,
        interface_name: String,
        api_name: String,
    }
}

impl WebInterface {
    #[must_use]
    pub fn new(interface_name: &str, api_name: &str) -> Self {
        Self {
            id: format!("{interface_name}#{api_name}"),
            interface_name: interface_name.to_string(),
            api_name: api_name.to_string(),
        }
    }
}
