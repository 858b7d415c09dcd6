// Typed, uncompiled view of the metadata document. Deserialized once via
// quick-xml's serde integration; no regex compilation happens here — that is
// `database::compile_region`'s job, invoked lazily per region.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename = "phoneNumberMetadata")]
pub struct RawDocument {
    pub territories: RawTerritories,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawTerritories {
    #[serde(rename = "territory", default)]
    pub territory: Vec<RawTerritory>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawTerritory {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@countryCode")]
    pub country_code: u16,

    #[serde(rename = "@leadingDigits", default)]
    pub leading_digits: Option<String>,

    #[serde(rename = "@internationalPrefix", default)]
    pub international_prefix: Option<String>,

    #[serde(rename = "@preferredInternationalPrefix", default)]
    pub preferred_international_prefix: Option<String>,

    #[serde(rename = "@nationalPrefix", default)]
    pub national_prefix: Option<String>,

    #[serde(rename = "@nationalPrefixFormattingRule", default)]
    pub national_prefix_formatting_rule: Option<String>,

    #[serde(rename = "@nationalPrefixForParsing", default)]
    pub national_prefix_for_parsing: Option<String>,

    #[serde(rename = "@nationalPrefixTransformRule", default)]
    pub national_prefix_transform_rule: Option<String>,

    #[serde(rename = "@carrierCodeFormattingRule", default)]
    pub carrier_code_formatting_rule: Option<String>,

    #[serde(rename = "@preferredExtnPrefix", default)]
    pub preferred_extn_prefix: Option<String>,

    #[serde(rename = "@mainCountryForCode", default)]
    pub main_country_for_code: bool,

    #[serde(rename = "@mobileNumberPortableRegion", default)]
    pub mobile_number_portable_region: bool,

    #[serde(rename = "@leadingZeroPossible", default)]
    pub leading_zero_possible: bool,

    #[serde(rename = "generalDesc")]
    pub general_desc: RawDescriptor,
    #[serde(rename = "fixedLine", default)]
    pub fixed_line: Option<RawDescriptor>,
    #[serde(rename = "mobile", default)]
    pub mobile: Option<RawDescriptor>,
    #[serde(rename = "tollFree", default)]
    pub toll_free: Option<RawDescriptor>,
    #[serde(rename = "premiumRate", default)]
    pub premium_rate: Option<RawDescriptor>,
    #[serde(rename = "sharedCost", default)]
    pub shared_cost: Option<RawDescriptor>,
    #[serde(rename = "personalNumber", default)]
    pub personal_number: Option<RawDescriptor>,
    #[serde(rename = "voip", default)]
    pub voip: Option<RawDescriptor>,
    #[serde(rename = "pager", default)]
    pub pager: Option<RawDescriptor>,
    #[serde(rename = "uan", default)]
    pub uan: Option<RawDescriptor>,
    #[serde(rename = "emergency", default)]
    pub emergency: Option<RawDescriptor>,
    #[serde(rename = "voicemail", default)]
    pub voicemail: Option<RawDescriptor>,
    #[serde(rename = "shortCode", default)]
    pub short_code: Option<RawDescriptor>,
    #[serde(rename = "standardRate", default)]
    pub standard_rate: Option<RawDescriptor>,
    #[serde(rename = "carrierSpecific", default)]
    pub carrier: Option<RawDescriptor>,
    #[serde(rename = "noInternationalDialling", default)]
    pub no_international: Option<RawDescriptor>,

    #[serde(rename = "availableFormats", default)]
    pub available_formats: Option<RawFormats>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawDescriptor {
    #[serde(rename = "nationalNumberPattern", default)]
    pub national_number_pattern: Option<String>,
    #[serde(rename = "possibleNumberPattern", default)]
    pub possible_number_pattern: Option<String>,
    #[serde(rename = "exampleNumber", default)]
    pub example_number: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawFormats {
    #[serde(rename = "numberFormat", default)]
    pub number_format: Vec<RawNumberFormat>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawNumberFormat {
    #[serde(rename = "@pattern")]
    pub pattern: String,

    #[serde(rename = "@nationalPrefixFormattingRule", default)]
    pub national_prefix_formatting_rule: Option<String>,

    #[serde(rename = "@nationalPrefixOptionalWhenFormatting", default)]
    pub national_prefix_optional_when_formatting: bool,

    #[serde(rename = "@carrierCodeFormattingRule", default)]
    pub carrier_code_formatting_rule: Option<String>,

    #[serde(rename = "leadingDigits", default)]
    pub leading_digits: Vec<String>,

    pub format: String,

    #[serde(rename = "intlFormat", default)]
    pub intl_format: Option<String>,
}

#[cfg(test)]
mod test {
    use super::RawDocument;

    #[test]
    fn parses_bundled_document() {
        let xml = include_str!("../../assets/metadata.xml");
        let doc: RawDocument = quick_xml::de::from_str(xml).unwrap();

        assert!(doc.territories.territory.iter().any(|t| t.id == "US"));
        assert!(doc.territories.territory.iter().any(|t| t.id == "NZ"));
        assert!(doc
            .territories
            .territory
            .iter()
            .any(|t| t.id == "001" && t.country_code == 800));
    }
}
