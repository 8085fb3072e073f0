use serde::Deserialize;

use clientele_core::customer::Customer;

/// Request payload for creating or replacing a customer.
///
/// Clients that echo records back may include an `id` field; it is ignored,
/// since ids come from the store (POST) or the request path (PUT).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCustomer {
    pub first_name: String,
    pub last_name: String,
}

impl SaveCustomer {
    /// Converts the payload into a not-yet-persisted customer.
    pub fn into_customer(self) -> Customer {
        Customer::new(self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_id_is_ignored() {
        let payload: SaveCustomer =
            serde_json::from_str(r#"{"id":99,"firstName":"Jack","lastName":"Bauer"}"#).unwrap();

        let customer = payload.into_customer();

        assert_eq!(customer.id, None);
        assert_eq!(customer.first_name, "Jack");
        assert_eq!(customer.last_name, "Bauer");
    }
}
