//! Shipping Documents & Customs Lookups
//!
//! Document lists, import regulations, HS headings and a dated preparation
//! checklist for a shipment.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{DocumentNote, ReferenceData};
use crate::error::Result;
use crate::model::{Incoterm, Party, TransportMode};

/// A document to prepare
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentItem {
    pub name: String,
    pub copies: String,
    pub purpose: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferential_option: Option<String>,
}

impl DocumentItem {
    fn new(name: &str, copies: &str, purpose: &str) -> Self {
        Self {
            name: name.to_string(),
            copies: copies.to_string(),
            purpose: purpose.to_string(),
            condition: None,
            deadline: None,
            preferential_option: None,
        }
    }
}

impl From<&DocumentNote> for DocumentItem {
    fn from(note: &DocumentNote) -> Self {
        Self {
            condition: note.condition.clone(),
            deadline: note.deadline.clone(),
            ..Self::new(&note.name, "1", &note.purpose)
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DocumentList {
    pub route: String,
    pub mode: TransportMode,

    /// Needed on every shipment of this mode
    pub required: Vec<DocumentItem>,

    /// Destination import and origin export extras
    pub additional: Vec<DocumentItem>,
}

impl DocumentList {
    pub fn all(&self) -> impl Iterator<Item = &DocumentItem> {
        self.required.iter().chain(&self.additional)
    }
}

pub fn required_documents(
    data: &ReferenceData,
    origin_country: &str,
    destination_country: &str,
    mode: TransportMode,
) -> DocumentList {
    let regs = &data.regulations;

    let mut required = vec![
        DocumentItem::new("Commercial Invoice", "3", "Value declaration for customs"),
        DocumentItem::new("Packing List", "3", "Contents and weights of packages"),
    ];

    required.push(match mode {
        TransportMode::Sea => DocumentItem::new("Bill of Lading (B/L)", "3 originals", "Title document"),
        TransportMode::Air => DocumentItem::new("Air Waybill (AWB)", "Original", "Contract of carriage"),
    });

    required.push(DocumentItem {
        preferential_option: regs.preferential_note(origin_country, destination_country),
        ..DocumentItem::new(
            "Certificate of Origin",
            "1",
            "Certifies where the goods were manufactured",
        )
    });

    let mut additional: Vec<DocumentItem> = regs
        .profile(destination_country)
        .map(|(_, profile)| profile.import_documents.iter().map(DocumentItem::from).collect())
        .unwrap_or_default();
    additional.extend(
        regs.export_documents_for(origin_country)
            .iter()
            .map(DocumentItem::from),
    );

    DocumentList {
        route: route_label(origin_country, destination_country),
        mode,
        required,
        additional,
    }
}

/// Import rules for one destination
#[derive(Clone, Debug, Serialize)]
pub struct RegulationSummary {
    pub country: String,
    pub product_type: String,
    pub vat_rate_percent: Decimal,
    pub restricted_items: Vec<String>,
    pub prohibited_items: Vec<String>,
    pub required_documents: Vec<String>,
    pub special_zones: Vec<String>,
}

/// `None` when the destination has no profile; no default applies here
pub fn customs_regulations(
    data: &ReferenceData,
    destination_country: &str,
    product_type: &str,
) -> Option<RegulationSummary> {
    let (country, profile) = data.regulations.profile(destination_country)?;

    Some(RegulationSummary {
        country: country.to_string(),
        product_type: product_type.to_string(),
        vat_rate_percent: (profile.vat_rate * Decimal::ONE_HUNDRED).normalize(),
        restricted_items: profile.restricted_items.clone(),
        prohibited_items: profile.prohibited_items.clone(),
        required_documents: profile.required_documents.clone(),
        special_zones: profile.special_zones.clone(),
    })
}

#[derive(Clone, Debug, Serialize)]
pub struct HsCodeInfo {
    pub hs_code: String,
    pub heading: String,
    pub description: String,
    pub typical_duty: String,
    pub duty_rate: Decimal,
}

/// Look up the heading of `hs_code`; unknown headings are `UnknownHsCode`
pub fn hs_code_info(data: &ReferenceData, hs_code: &str) -> Result<HsCodeInfo> {
    let (heading, info) = data.regulations.hs_code(hs_code)?;
    Ok(HsCodeInfo {
        hs_code: hs_code.trim().to_string(),
        heading: heading.to_string(),
        description: info.description.clone(),
        typical_duty: info.typical_duty.clone(),
        duty_rate: info.duty_rate,
    })
}

/// Transit assumed by the checklist timeline
pub fn checklist_transit_days(mode: TransportMode) -> i64 {
    match mode {
        TransportMode::Air => 3,
        TransportMode::Sea => 10,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub day: i64,
    pub task: &'static str,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChecklistTask {
    pub task: &'static str,
    pub responsible: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ShippingChecklist {
    pub route: String,
    pub mode: TransportMode,
    pub incoterm: Incoterm,
    pub insurance_by: Party,
    pub freight_by: Party,
    pub timeline: Vec<Milestone>,
    pub pre_shipment: Vec<ChecklistTask>,
    pub documents: Vec<DocumentItem>,
}

pub fn shipping_checklist(
    data: &ReferenceData,
    origin_country: &str,
    destination_country: &str,
    mode: TransportMode,
    incoterm: Incoterm,
    today: NaiveDate,
) -> ShippingChecklist {
    let transit = checklist_transit_days(mode);
    let timeline = [
        (0, "Booking confirmation"),
        (2, "Cargo ready"),
        (3, "Departure"),
        (3 + transit, "Arrival"),
        (5 + transit, "Delivery"),
    ]
    .into_iter()
    .map(|(day, task)| Milestone {
        day,
        task,
        date: today + Duration::days(day),
    })
    .collect();

    let task = |task: &'static str, responsible: &str| ChecklistTask {
        task,
        responsible: responsible.to_string(),
    };
    let pre_shipment = vec![
        task("Confirm order details with buyer", "Shipper"),
        task("Book cargo space with carrier", "Shipper/Forwarder"),
        task("Arrange cargo insurance", &incoterm.insurance_by().to_string()),
        task("Prepare commercial invoice", "Shipper"),
        task("Prepare packing list", "Shipper"),
        task("Obtain certificate of origin", "Shipper"),
        task("Check export license requirements", "Shipper"),
    ];

    let documents = required_documents(data, origin_country, destination_country, mode)
        .all()
        .cloned()
        .collect();

    ShippingChecklist {
        route: route_label(origin_country, destination_country),
        mode,
        incoterm,
        insurance_by: incoterm.insurance_by(),
        freight_by: incoterm.freight_by(),
        timeline,
        pre_shipment,
        documents,
    }
}

fn route_label(origin: &str, destination: &str) -> String {
    format!("{} → {}", origin.trim(), destination.trim())
}
