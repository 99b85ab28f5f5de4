use serde::Deserialize;

use super::time::optional_timestamp;
use super::{TransportError, UriXml};
use crate::domain::{Account, AccountsResponse, Timestamp};

#[derive(Debug, Deserialize)]
struct AccountsXml {
    #[serde(rename = "account", default)]
    accounts: Vec<AccountXml>,
}

#[derive(Debug, Deserialize)]
struct AccountXml {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(rename = "@uri", default)]
    uri: String,
    #[serde(default)]
    reference: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    address: String,
    #[serde(rename = "type", default)]
    account_type: String,
    #[serde(rename = "messagesremaining", default)]
    messages_remaining: i64,
    #[serde(rename = "expireson", default, deserialize_with = "optional_timestamp")]
    expires_on: Option<Timestamp>,
    #[serde(default)]
    role: String,
    #[serde(default)]
    settings: UriXml,
}

impl From<AccountXml> for Account {
    fn from(value: AccountXml) -> Self {
        Account {
            id: value.id,
            uri: value.uri,
            reference: value.reference,
            label: value.label,
            address: value.address,
            account_type: value.account_type,
            messages_remaining: value.messages_remaining,
            expires_on: value.expires_on,
            role: value.role,
            settings_uri: value.settings.uri,
        }
    }
}

pub fn decode_accounts_xml_response(xml: &str) -> Result<AccountsResponse, TransportError> {
    let parsed: AccountsXml = quick_xml::de::from_str(xml)?;
    Ok(AccountsResponse {
        accounts: parsed.accounts.into_iter().map(Account::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accounts_maps_every_field() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<accounts xmlns="http://api.esendex.com/ns/">
 <account id="accountid" uri="http://someaccount">
  <reference>EX093052</reference>
  <label>My account</label>
  <address>443523</address>
  <type>Professional</type>
  <messagesremaining>2322</messagesremaining>
  <expireson>2012-01-01T12:00:05</expireson>
  <role>CoolUser</role>
  <settings uri="http://somesettings" />
 </account>
</accounts>"#;

        let response = decode_accounts_xml_response(xml).unwrap();
        assert_eq!(response.accounts.len(), 1);

        let account = &response.accounts[0];
        assert_eq!(account.id, "accountid");
        assert_eq!(account.uri, "http://someaccount");
        assert_eq!(account.reference, "EX093052");
        assert_eq!(account.label, "My account");
        assert_eq!(account.address, "443523");
        assert_eq!(account.account_type, "Professional");
        assert_eq!(account.messages_remaining, 2322);
        assert_eq!(
            account.expires_on,
            Some(Timestamp::parse("2012-01-01T12:00:05").unwrap())
        );
        assert_eq!(account.role, "CoolUser");
        assert_eq!(account.settings_uri, "http://somesettings");
    }

    #[test]
    fn decode_accounts_tolerates_missing_expiry() {
        let xml = r#"<accounts xmlns="http://api.esendex.com/ns/">
 <account id="a" uri="u"><reference>EX1</reference></account>
</accounts>"#;

        let response = decode_accounts_xml_response(xml).unwrap();
        assert_eq!(response.accounts[0].expires_on, None);
        assert_eq!(response.accounts[0].settings_uri, "");
    }

    #[test]
    fn decode_accounts_allows_empty_list() {
        let xml = r#"<accounts xmlns="http://api.esendex.com/ns/"></accounts>"#;
        let response = decode_accounts_xml_response(xml).unwrap();
        assert!(response.accounts.is_empty());
    }
}
