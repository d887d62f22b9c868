//! JSON payload factories.

use serde_json::{json, Value};

/// Airtable table holding pilot records in [`airtable_config`]
pub static PILOT_TABLE: &str = "Pilots";
/// Airtable table receiving PIREPs in [`airtable_config`]
pub static PIREP_TABLE: &str = "PIREPs";
pub static TEST_AIRTABLE_API_KEY: &str = "keyTest";

/// Two modes: `career` files against its auto route "Career Route" with a 1.5x multiplier,
/// `charter` requires the pilot to pick a route
pub fn flight_modes() -> Value {
    json!({
        "career": {
            "enabled": true,
            "displayName": "Career Mode",
            "requiresRouteSelection": false,
            "fields": [
                { "name": "fuel_kg", "type": "number", "label": "Fuel (kg)", "required": false }
            ],
            "validations": {
                "allowAnyCurrentRoute": true,
                "validationMode": "any",
                "allowedRoutes": []
            },
            "metadata": { "multiplier": 1.5 },
            "autoRoute": { "routeName": "Career Route" }
        },
        "charter": {
            "enabled": true,
            "displayName": "Charter",
            "requiresRouteSelection": true,
            "fields": [
                { "name": "passengers", "type": "number", "label": "Passengers", "required": true }
            ],
            "validations": {
                "allowAnyCurrentRoute": false,
                "validationMode": "exact_match",
                "allowedRoutes": ["KJFK-EGLL"]
            }
        }
    })
}

/// Airtable configuration with a pilot schema (callsign lookup) and a PIREP schema whose
/// remarks field carries the bot metadata block
pub fn airtable_config(base_id: &str) -> Value {
    json!({
        "providerType": "airtable",
        "credentials": { "apiKey": TEST_AIRTABLE_API_KEY, "baseId": base_id },
        "schemas": [
            {
                "entityType": "pilot",
                "tableName": PILOT_TABLE,
                "fields": [
                    { "internalName": "callsign", "providerFieldName": "Callsign", "isUserVisible": true },
                    {
                        "internalName": "total_hours",
                        "providerFieldName": "Total Hours",
                        "dataType": "float",
                        "displayFormat": "duration",
                        "displayName": "Total Hours",
                        "isUserVisible": true
                    },
                    { "internalName": "email", "providerFieldName": "Email" }
                ]
            },
            {
                "entityType": "pirep",
                "tableName": PIREP_TABLE,
                "fields": [
                    { "internalName": "pilot", "providerFieldName": "Pilot" },
                    { "internalName": "aircraft", "providerFieldName": "Aircraft" },
                    { "internalName": "route", "providerFieldName": "Route" },
                    { "internalName": "mode", "providerFieldName": "Mode" },
                    { "internalName": "flight_time", "providerFieldName": "Flight Time", "dataType": "int" },
                    { "internalName": "date", "providerFieldName": "Date", "dataType": "date" },
                    { "internalName": "fuel_kg", "providerFieldName": "Fuel", "dataType": "float" },
                    { "internalName": "remarks", "providerFieldName": "Remarks", "botMetadataFlag": true }
                ]
            }
        ]
    })
}
