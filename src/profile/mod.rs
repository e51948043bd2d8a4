//! The eleven profile sections and the registry that owns them.
//!
//! | Module      | Payload             | Sections                                        |
//! |-------------|---------------------|-------------------------------------------------|
//! | `text`      | `TextField`         | contact, personal, address, professional, custom |
//! | `emergency` | `TextField`         | emergency                                       |
//! | `skill`     | `SkillField`        | skills                                          |
//! | `link`      | `LinkField`         | links                                           |
//! | `document`  | `DocumentField`     | documents                                       |
//! | `gallery`   | `GalleryImage`      | gallery                                         |
//! | `social`    | `SocialMediaField`  | social-media                                    |
//!
//! The profile hub (`crate::hub`) is registered alongside them under the
//! slug `profile`.

pub mod document;
pub mod emergency;
pub mod gallery;
pub mod link;
pub mod seed;
pub mod skill;
pub mod social;
pub mod text;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use folio_common::{Field, Payload};

use crate::collection::{PresentationTable, UnknownFieldPolicy};
use crate::errors::SectionError;
use crate::hub::{self, HUB_SLUG, MemoryHubStore, ProfileHub};
use crate::section::{Section, SectionService, ViewShape};
use crate::staleness::{InvalidationBus, StaleFlags};
use crate::store::{MemoryStore, StoreLatency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    Contact,
    Personal,
    Address,
    Professional,
    Skills,
    Links,
    Documents,
    Gallery,
    SocialMedia,
    CustomFields,
    Emergency,
}

impl Domain {
    pub const ALL: [Domain; 11] = [
        Domain::Contact,
        Domain::Personal,
        Domain::Address,
        Domain::Professional,
        Domain::Skills,
        Domain::Links,
        Domain::Documents,
        Domain::Gallery,
        Domain::SocialMedia,
        Domain::CustomFields,
        Domain::Emergency,
    ];

    /// URL and flag slug.
    pub fn slug(self) -> &'static str {
        match self {
            Domain::Contact => "contact",
            Domain::Personal => "personal",
            Domain::Address => "address",
            Domain::Professional => "professional",
            Domain::Skills => "skills",
            Domain::Links => "links",
            Domain::Documents => "documents",
            Domain::Gallery => "gallery",
            Domain::SocialMedia => "social-media",
            Domain::CustomFields => "custom-fields",
            Domain::Emergency => "emergency",
        }
    }

    /// `group` value carried in the stored envelope.
    pub fn group(self) -> &'static str {
        match self {
            Domain::Contact => "contact",
            Domain::Personal => "personal",
            Domain::Address => "address",
            Domain::Professional => "professional",
            Domain::Skills => "skillSet",
            Domain::Links => "links",
            Domain::Documents => "document",
            Domain::Gallery => "gallery",
            Domain::SocialMedia => "socialMedia",
            Domain::CustomFields => "customFields",
            Domain::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Domain {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|d| d.slug() == s || d.group().eq_ignore_ascii_case(s))
            .ok_or_else(|| SectionError::UnknownGroup(s.to_string()))
    }
}

/// Settings shared by every seeded section.
#[derive(Debug, Clone, Copy)]
pub struct RegistryOptions {
    pub account_id: i64,
    pub latency: StoreLatency,
    pub policy: UnknownFieldPolicy,
    pub bus_capacity: usize,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            account_id: 25,
            latency: StoreLatency::default(),
            policy: UnknownFieldPolicy::default(),
            bus_capacity: 64,
        }
    }
}

/// Summary row for `GET /api/groups` and `folio groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupInfo {
    pub slug: &'static str,
    pub group: &'static str,
    pub flag: String,
}

/// Owns every section, the profile hub, the shared flag registry and the
/// invalidation bus.
pub struct ProfileRegistry {
    sections: BTreeMap<Domain, Arc<dyn SectionService>>,
    hub: Arc<ProfileHub>,
    flags: Arc<StaleFlags>,
    bus: InvalidationBus,
}

impl ProfileRegistry {
    /// Build the hub and all eleven sections over in-memory stores holding
    /// the demo profile.
    pub fn seeded(options: RegistryOptions) -> Self {
        let flags = Arc::new(StaleFlags::new());
        let bus = InvalidationBus::new(options.bus_capacity);
        let hub = Arc::new(ProfileHub::new(
            Arc::new(MemoryHubStore::new(hub::seed::hub(options.account_id), options.latency)),
            options.policy,
            &flags,
            bus.clone(),
        ));
        let mut registry = Self {
            sections: BTreeMap::new(),
            hub,
            flags,
            bus,
        };

        registry.add(Domain::Contact, Some(false), seed::contact(), &text::CONTACT, None, options);
        registry.add(Domain::Personal, None, seed::personal(), &text::PERSONAL, None, options);
        registry.add(Domain::Address, None, seed::address(), &text::ADDRESS, None, options);
        registry.add(Domain::Professional, None, seed::professional(), &text::PROFESSIONAL, None, options);
        registry.add(Domain::Skills, Some(false), seed::skills(), &skill::SKILLS, None, options);
        registry.add(Domain::Links, None, seed::links(), &link::LINKS, None, options);
        registry.add(Domain::Documents, Some(false), seed::documents(), &document::DOCUMENTS, None, options);
        registry.add(Domain::Gallery, Some(false), seed::gallery(), &gallery::GALLERY, None, options);
        registry.add(
            Domain::SocialMedia,
            None,
            seed::social_media(),
            &social::SOCIAL,
            Some(social::grouped_view as ViewShape<social::SocialMediaField>),
            options,
        );
        registry.add(Domain::CustomFields, None, seed::custom_fields(), &text::CUSTOM, None, options);
        registry.add(
            Domain::Emergency,
            Some(false),
            seed::emergency(),
            &emergency::EMERGENCY,
            Some(emergency::action_view as ViewShape<text::TextField>),
            options,
        );

        tracing::debug!(sections = registry.sections.len(), "seeded profile registry");
        registry
    }

    fn add<P: Payload>(
        &mut self,
        domain: Domain,
        share: Option<bool>,
        fields: Vec<Field<P>>,
        presentation: &'static PresentationTable,
        shape: Option<ViewShape<P>>,
        options: RegistryOptions,
    ) {
        let envelope = seed::envelope(options.account_id, domain.group(), share, fields);
        let store = Arc::new(MemoryStore::new(envelope, options.latency));
        let mut section = Section::new(
            domain.slug(),
            store,
            presentation,
            options.policy,
            &self.flags,
            self.bus.clone(),
        );
        if let Some(shape) = shape {
            section = section.with_view_shape(shape);
        }
        self.sections.insert(domain, Arc::new(section));
    }

    /// Look a section up by slug or envelope group name. `profile` is the hub.
    pub fn get(&self, group: &str) -> Result<Arc<dyn SectionService>, SectionError> {
        if group == HUB_SLUG {
            return Ok(self.hub.clone());
        }
        let domain: Domain = group.parse()?;
        self.sections
            .get(&domain)
            .cloned()
            .ok_or_else(|| SectionError::UnknownGroup(group.to_string()))
    }

    /// Every section in declaration order, then the hub.
    pub fn groups(&self) -> Vec<GroupInfo> {
        self.sections
            .iter()
            .map(|(domain, section)| GroupInfo {
                slug: domain.slug(),
                group: domain.group(),
                flag: section.flag_name().to_string(),
            })
            .chain(std::iter::once(GroupInfo {
                slug: HUB_SLUG,
                group: HUB_SLUG,
                flag: self.hub.flag_name().to_string(),
            }))
            .collect()
    }


    pub fn flags(&self) -> &StaleFlags {
        &self.flags
    }

    pub fn bus(&self) -> &InvalidationBus {
        &self.bus
    }
}
