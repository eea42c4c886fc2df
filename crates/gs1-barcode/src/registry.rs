//! Application identifier registry.
//!
//! Static, read-only tables built once on first use:
//! - known AI codes with their labels
//! - fixed-length AIs and their element length
//! - identifier type to AI mapping
//! - the character set values may use when formatted
//!
//! Fixed lengths are GS1 element lengths and include the AI itself: `00` has
//! length 20 (2 AI digits + 18-digit SSCC), `3103` has length 10 (4 AI
//! digits + 6 data digits). Any AI missing from the fixed-length table is
//! variable length and terminated by a group separator or end of input.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::model::IdentifierType;

/// Shortest AI code.
pub const MIN_AI_LEN: usize = 2;

/// Longest AI code.
pub const MAX_AI_LEN: usize = 4;

/// A registered application identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationIdentifier {
    /// 2 to 4 digit code, e.g. "01" or "3103".
    pub code: String,
    /// Human-readable description.
    pub label: &'static str,
    /// Element length including the AI, for fixed-length fields.
    pub fixed_length: Option<usize>,
}

impl ApplicationIdentifier {
    pub fn is_fixed_length(&self) -> bool {
        self.fixed_length.is_some()
    }

    /// Number of data characters following the AI in a fixed-length field.
    pub fn data_length(&self) -> Option<usize> {
        self.fixed_length
            .map(|len| len.saturating_sub(self.code.len()))
    }

    /// The identifier type carried under this AI, if any.
    pub fn identifier_type(&self) -> Option<IdentifierType> {
        identifier_for_ai(&self.code)
    }
}

/// Exact fixed-length entries.
const FIXED_LENGTHS: &[(&str, usize)] = &[
    ("00", 20),
    ("01", 16),
    ("02", 16),
    ("03", 16),
    ("04", 18),
    ("11", 8),
    ("12", 8),
    ("13", 8),
    ("14", 8),
    ("15", 8),
    ("16", 8),
    ("17", 8),
    ("18", 8),
    ("19", 8),
    ("20", 4),
    ("41", 16),
];

/// Measure AI ranges: each 3-digit prefix is combined with a decimal point
/// indicator 0-9 and has element length 10.
const MEASURE_RANGES: &[(u16, u16)] = &[
    (310, 316),
    (320, 326),
    (330, 336),
    (340, 346),
    (350, 356),
    (360, 366),
];

const MEASURE_LENGTH: usize = 10;

/// Labels for the AIs that are not measures.
const LABELS: &[(&str, &str)] = &[
    ("00", "Serial Shipping Container Code (SSCC)"),
    ("01", "Global Trade Item Number (GTIN)"),
    ("02", "GTIN of Contained Trade Items"),
    ("03", "Reserved (fixed length)"),
    ("04", "Reserved (fixed length)"),
    ("10", "Batch or Lot Number"),
    ("11", "Production Date"),
    ("12", "Due Date"),
    ("13", "Packaging Date"),
    ("14", "Reserved (date)"),
    ("15", "Best Before Date"),
    ("16", "Sell By Date"),
    ("17", "Expiration Date"),
    ("18", "Reserved (date)"),
    ("19", "Reserved (date)"),
    ("20", "Internal Product Variant"),
    ("21", "Serial Number"),
    ("22", "Consumer Product Variant"),
    ("240", "Additional Product Identification"),
    ("241", "Customer Part Number"),
    ("242", "Made-to-Order Variation Number"),
    ("243", "Packaging Component Number"),
    ("250", "Secondary Serial Number"),
    ("251", "Reference to Source Entity"),
    ("253", "Global Document Type Identifier (GDTI)"),
    ("254", "GLN Extension Component"),
    ("255", "Global Coupon Number (GCN)"),
    ("30", "Variable Count of Items"),
    ("37", "Count of Trade Items"),
    ("400", "Customer's Purchase Order Number"),
    ("401", "Global Identification Number for Consignment (GINC)"),
    ("402", "Global Shipment Identification Number (GSIN)"),
    ("403", "Routing Code"),
    ("41", "Reserved (fixed length)"),
    ("410", "Ship To / Deliver To GLN"),
    ("411", "Bill To / Invoice To GLN"),
    ("412", "Purchased From GLN"),
    ("413", "Ship For / Deliver For GLN"),
    ("414", "Global Location Number (GLN)"),
    ("415", "Invoicing Party GLN"),
    ("416", "Production or Service Location GLN"),
    ("417", "Party GLN"),
    ("420", "Ship To Postal Code"),
    ("421", "Ship To Postal Code with ISO Country Code"),
    ("422", "Country of Origin"),
    ("423", "Country of Initial Processing"),
    ("424", "Country of Processing"),
    ("425", "Country of Disassembly"),
    ("426", "Country Covering Full Process Chain"),
    ("7001", "NATO Stock Number"),
    ("7002", "UN/ECE Meat Carcasses and Cuts Classification"),
    ("7003", "Expiration Date and Time"),
    ("8001", "Roll Products"),
    ("8002", "Cellular Mobile Telephone Identifier"),
    ("8003", "Global Returnable Asset Identifier (GRAI)"),
    ("8004", "Global Individual Asset Identifier (GIAI)"),
    ("8005", "Price per Unit of Measure"),
    ("8006", "Identification of an Individual Trade Item Piece"),
    ("8007", "International Bank Account Number"),
    ("8008", "Date and Time of Production"),
    ("8018", "Global Service Relation Number (GSRN)"),
    ("8020", "Payment Slip Reference Number"),
    ("90", "Information Mutually Agreed Between Trading Partners"),
    ("91", "Company Internal Information"),
    ("92", "Company Internal Information"),
    ("93", "Company Internal Information"),
    ("94", "Company Internal Information"),
    ("95", "Company Internal Information"),
    ("96", "Company Internal Information"),
    ("97", "Company Internal Information"),
    ("98", "Company Internal Information"),
    ("99", "Company Internal Information"),
];

/// Labels for the measure prefixes, by 3-digit prefix.
fn measure_label(prefix: u16) -> &'static str {
    match prefix {
        310 => "Net Weight (kg)",
        311 => "Length (m)",
        312 => "Width (m)",
        313 => "Height (m)",
        314 => "Area (m2)",
        315 => "Net Volume (l)",
        316 => "Net Volume (m3)",
        320 => "Net Weight (lb)",
        321 => "Length (in)",
        322 => "Length (ft)",
        323 => "Length (yd)",
        324 => "Width (in)",
        325 => "Width (ft)",
        326 => "Width (yd)",
        330 => "Logistic Weight (kg)",
        331 => "Logistic Length (m)",
        332 => "Logistic Width (m)",
        333 => "Logistic Height (m)",
        334 => "Logistic Area (m2)",
        335 => "Logistic Volume (l)",
        336 => "Logistic Volume (m3)",
        340 => "Logistic Weight (lb)",
        341 => "Logistic Length (in)",
        342 => "Logistic Length (ft)",
        343 => "Logistic Length (yd)",
        344 => "Logistic Width (in)",
        345 => "Logistic Width (ft)",
        346 => "Logistic Width (yd)",
        350 => "Area (in2)",
        351 => "Area (ft2)",
        352 => "Area (yd2)",
        353 => "Logistic Area (in2)",
        354 => "Logistic Area (ft2)",
        355 => "Logistic Area (yd2)",
        356 => "Net Weight (troy oz)",
        360 => "Net Volume (qt)",
        361 => "Net Volume (gal)",
        362 => "Logistic Volume (qt)",
        363 => "Logistic Volume (gal)",
        364 => "Net Volume (in3)",
        365 => "Net Volume (ft3)",
        366 => "Net Volume (yd3)",
        _ => "Measure",
    }
}

/// Expands a measure range into 4-digit codes (`3100`..`3169` for 310..316).
fn expand_measure_range(start: u16, end: u16) -> impl Iterator<Item = (String, u16)> {
    (start..=end).flat_map(|prefix| (0..=9).map(move |indicator| (format!("{prefix}{indicator}"), prefix)))
}

fn build_fixed_lengths() -> FxHashMap<String, usize> {
    let mut table: FxHashMap<String, usize> = FIXED_LENGTHS
        .iter()
        .map(|(code, len)| (code.to_string(), *len))
        .collect();
    for (start, end) in MEASURE_RANGES {
        for (code, _) in expand_measure_range(*start, *end) {
            table.insert(code, MEASURE_LENGTH);
        }
    }
    table
}

fn build_registry(fixed: &FxHashMap<String, usize>) -> FxHashMap<String, ApplicationIdentifier> {
    let mut registry = FxHashMap::default();
    for (code, label) in LABELS {
        registry.insert(
            code.to_string(),
            ApplicationIdentifier {
                code: code.to_string(),
                label: *label,
                fixed_length: fixed.get(*code).copied(),
            },
        );
    }
    for (start, end) in MEASURE_RANGES {
        for (code, prefix) in expand_measure_range(*start, *end) {
            let fixed_length = fixed.get(&code).copied();
            registry.insert(
                code.clone(),
                ApplicationIdentifier {
                    code,
                    label: measure_label(prefix),
                    fixed_length,
                },
            );
        }
    }
    registry
}

lazy_static! {
    static ref FIXED_LENGTH_TABLE: FxHashMap<String, usize> = build_fixed_lengths();
    static ref REGISTRY: FxHashMap<String, ApplicationIdentifier> =
        build_registry(&FIXED_LENGTH_TABLE);
}

/// Looks up a known AI.
pub fn lookup(code: &str) -> Option<&'static ApplicationIdentifier> {
    REGISTRY.get(code)
}

/// Returns true if the AI is registered.
pub fn is_known(code: &str) -> bool {
    REGISTRY.contains_key(code)
}

/// Returns the AI label, if registered.
pub fn label(code: &str) -> Option<&'static str> {
    lookup(code).map(|ai| ai.label)
}

/// Returns the element length (AI included) of a fixed-length AI.
///
/// `None` means the AI is variable length.
pub fn fixed_length(code: &str) -> Option<usize> {
    FIXED_LENGTH_TABLE.get(code).copied()
}

/// Returns the number of data characters of a fixed-length AI.
pub fn data_length(code: &str) -> Option<usize> {
    fixed_length(code).map(|len| len.saturating_sub(code.len()))
}

/// Finds the longest registered AI at the start of `input`.
///
/// AI codes are not self-delimiting, so 4, 3 and then 2 leading digits are
/// tried against the registry in that order.
pub fn match_prefix(input: &str) -> Option<&'static ApplicationIdentifier> {
    let bytes = input.as_bytes();
    (MIN_AI_LEN..=MAX_AI_LEN).rev().find_map(|len| {
        let candidate = bytes.get(..len)?;
        if !candidate.iter().all(u8::is_ascii_digit) {
            return None;
        }
        // All ASCII digits, so the byte range is a char boundary.
        lookup(&input[..len])
    })
}

/// Iterates every registered AI (unordered).
pub fn known_identifiers() -> impl Iterator<Item = &'static ApplicationIdentifier> {
    REGISTRY.values()
}

/// Returns the canonical AI for an identifier type.
pub fn ai_for(kind: IdentifierType) -> &'static str {
    match kind {
        IdentifierType::Gtin => "01",
        IdentifierType::Sscc => "00",
        IdentifierType::Gln => "414",
        IdentifierType::Grai => "8003",
        IdentifierType::Giai => "8004",
        IdentifierType::Gsrn => "8018",
        IdentifierType::Gdti => "253",
        IdentifierType::Ginc => "401",
        IdentifierType::Gsin => "402",
    }
}

/// Returns the identifier type whose canonical AI is `code`.
pub fn identifier_for_ai(code: &str) -> Option<IdentifierType> {
    IdentifierType::ALL
        .into_iter()
        .find(|kind| ai_for(*kind) == code)
}

/// Returns true if `ch` may appear in a formatted AI value.
///
/// This is the GS1 encodable subset of printable ASCII: space, digits,
/// letters and `! " % & ' ( ) * + , - . / : ; < = > ?`.
pub fn is_encodable(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            ' ' | '!'
                | '"'
                | '%'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | '-'
                | '.'
                | '/'
                | ':'
                | ';'
                | '<'
                | '='
                | '>'
                | '?'
        )
}
