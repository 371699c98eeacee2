//! # Campaign Catalog
//!
//! Campaign definitions as they appear in configuration, loaded from
//! `config/campaigns.toml`:
//!
//! ```toml
//! [[campaigns]]
//! id = "c10"
//! type = "percent_coupon"
//! percent = 10
//!
//! [[campaigns]]
//! id = "s300-40"
//! type = "threshold_every_x_get_y"
//! every_x = 300
//! minus_y = 40
//! label = "Mid-season sale"
//! ```

use crate::campaign::{Campaign, CampaignKind, CampaignRule};
use crate::error::{PricingError, PricingResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Serializable description of a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignSpec {
    /// Unique campaign identifier
    pub id: String,

    /// Replaces the generated labels when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Discount rule, tagged by `type`
    #[serde(flatten)]
    pub rule: CampaignRule,
}

impl CampaignSpec {
    pub fn new(id: impl Into<String>, rule: CampaignRule) -> Self {
        Self {
            id: id.into(),
            label: None,
            rule,
        }
    }

    /// Builder: set label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn kind(&self) -> CampaignKind {
        self.rule.kind()
    }
}

impl From<CampaignSpec> for Campaign {
    fn from(spec: CampaignSpec) -> Self {
        let campaign = Campaign::new(spec.id, spec.rule);
        match spec.label {
            Some(label) => campaign.with_label(label),
            None => campaign,
        }
    }
}

impl From<&CampaignSpec> for Campaign {
    fn from(spec: &CampaignSpec) -> Self {
        Campaign::from(spec.clone())
    }
}

/// Configured campaigns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignCatalog {
    #[serde(default)]
    pub campaigns: Vec<CampaignSpec>,
}

impl CampaignCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            campaigns: Vec::new(),
        }
    }

    /// Add a campaign to the catalog
    pub fn add(&mut self, spec: CampaignSpec) {
        self.campaigns.push(spec);
    }

    /// Builder: add a campaign
    pub fn with_campaign(mut self, spec: CampaignSpec) -> Self {
        self.add(spec);
        self
    }

    /// Find a campaign by ID
    pub fn get(&self, id: &str) -> Option<&CampaignSpec> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    /// Campaigns of one category, in catalog order
    pub fn by_kind(&self, kind: CampaignKind) -> impl Iterator<Item = &CampaignSpec> {
        self.campaigns.iter().filter(move |c| c.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    /// Reject catalogs where two campaigns share an id
    pub fn validate(&self) -> PricingResult<()> {
        let mut seen = HashSet::new();
        for spec in &self.campaigns {
            if !seen.insert(spec.id.as_str()) {
                return Err(PricingError::DuplicateCampaign {
                    campaign_id: spec.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Build campaigns for the given ids, preserving their order
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> PricingResult<Vec<Campaign>> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.get(id)
                    .map(Campaign::from)
                    .ok_or_else(|| PricingError::CampaignNotFound {
                        campaign_id: id.to_string(),
                    })
            })
            .collect()
    }

    /// Load and validate a catalog from a TOML string
    pub fn from_toml(toml_str: &str) -> PricingResult<Self> {
        let catalog: CampaignCatalog = toml::from_str(toml_str)?;
        catalog.validate()?;
        Ok(catalog)
    }
}
