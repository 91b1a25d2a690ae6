// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Components (RFC 5545 Sections 3.4 and 3.6): the calendar tree, its
//! mutation and query operations, and the advisory validation pass.

use std::fmt::{self, Display};

use crate::keyword::{
    KW_DAYLIGHT, KW_STANDARD, KW_VAGENDA, KW_VALARM, KW_VCALENDAR, KW_VEVENT, KW_VFREEBUSY,
    KW_VJOURNAL, KW_VQUERY, KW_VTIMEZONE, KW_VTODO,
};
use crate::property::{Property, PropertyKind};
use crate::value::Value;

/// A component name: the RFC 5545 set, the RFC draft calendar-access
/// components VAGENDA and VQUERY, and extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentKind {
    /// VCALENDAR
    VCalendar,
    /// VEVENT
    VEvent,
    /// VTODO
    VTodo,
    /// VJOURNAL
    VJournal,
    /// VFREEBUSY
    VFreeBusy,
    /// VTIMEZONE
    VTimezone,
    /// VALARM
    VAlarm,
    /// STANDARD (inside VTIMEZONE)
    Standard,
    /// DAYLIGHT (inside VTIMEZONE)
    Daylight,
    /// VAGENDA (calendar-access draft)
    VAgenda,
    /// VQUERY (calendar-access draft)
    VQuery,
    /// An experimental component ("X-" prefix), name stored uppercased
    XName(String),
    /// An unrecognized component assumed IANA-registered, name stored
    /// uppercased
    Iana(String),
}

impl ComponentKind {
    /// Look up a component name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            KW_VCALENDAR => Self::VCalendar,
            KW_VEVENT => Self::VEvent,
            KW_VTODO => Self::VTodo,
            KW_VJOURNAL => Self::VJournal,
            KW_VFREEBUSY => Self::VFreeBusy,
            KW_VTIMEZONE => Self::VTimezone,
            KW_VALARM => Self::VAlarm,
            KW_STANDARD => Self::Standard,
            KW_DAYLIGHT => Self::Daylight,
            KW_VAGENDA => Self::VAgenda,
            KW_VQUERY => Self::VQuery,
            _ if upper.starts_with("X-") => Self::XName(upper),
            _ => Self::Iana(upper),
        }
    }

    /// The canonical (uppercase) component name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::VCalendar => KW_VCALENDAR,
            Self::VEvent => KW_VEVENT,
            Self::VTodo => KW_VTODO,
            Self::VJournal => KW_VJOURNAL,
            Self::VFreeBusy => KW_VFREEBUSY,
            Self::VTimezone => KW_VTIMEZONE,
            Self::VAlarm => KW_VALARM,
            Self::Standard => KW_STANDARD,
            Self::Daylight => KW_DAYLIGHT,
            Self::VAgenda => KW_VAGENDA,
            Self::VQuery => KW_VQUERY,
            Self::XName(name) | Self::Iana(name) => name,
        }
    }
}

impl Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar component: a kind, its properties, and nested components.
///
/// The component exclusively owns its subtree. Properties and children
/// keep insertion order so serialization is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Component name
    pub kind: ComponentKind,
    properties: Vec<Property>,
    children: Vec<Component>,
}

impl Component {
    /// An empty component of the given kind.
    #[must_use]
    pub const fn new(kind: ComponentKind) -> Self {
        Self { kind, properties: Vec::new(), children: Vec::new() }
    }

    /// Properties in serialization order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Child components in serialization order.
    #[must_use]
    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Append a property.
    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Remove the property at `index`, keeping the order of the rest.
    pub fn remove_property(&mut self, index: usize) -> Option<Property> {
        (index < self.properties.len()).then(|| self.properties.remove(index))
    }

    /// Replace the property at `index`, returning the old one.
    pub fn replace_property(&mut self, index: usize, property: Property) -> Option<Property> {
        let slot = self.properties.get_mut(index)?;
        Some(std::mem::replace(slot, property))
    }

    /// Append a child component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Remove the child at `index` and its whole subtree.
    pub fn remove_child(&mut self, index: usize) -> Option<Component> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// Replace the child at `index`, returning the old subtree.
    pub fn replace_child(&mut self, index: usize, child: Component) -> Option<Component> {
        let slot = self.children.get_mut(index)?;
        Some(std::mem::replace(slot, child))
    }

    /// The first direct child of the given kind.
    #[must_use]
    pub fn first_child_of_kind(&self, kind: &ComponentKind) -> Option<&Component> {
        self.children.iter().find(|c| c.kind == *kind)
    }

    /// Mutable access to the first direct child of the given kind.
    pub fn first_child_of_kind_mut(&mut self, kind: &ComponentKind) -> Option<&mut Component> {
        self.children.iter_mut().find(|c| c.kind == *kind)
    }

    /// The first property with the given kind.
    #[must_use]
    pub fn property(&self, kind: &PropertyKind) -> Option<&Property> {
        self.properties.iter().find(|p| p.kind == *kind)
    }

    /// All properties with the given kind, in order.
    pub fn properties_named<'a>(
        &'a self,
        kind: &'a PropertyKind,
    ) -> impl Iterator<Item = &'a Property> {
        self.properties.iter().filter(move |p| p.kind == *kind)
    }

    /// The VTIMEZONE child whose TZID property matches `tzid`.
    ///
    /// This is how a zoned date-time in the tree resolves its zone
    /// definition against the enclosing VCALENDAR.
    #[must_use]
    pub fn timezone(&self, tzid: &str) -> Option<&Component> {
        self.children.iter().find(|child| {
            child.kind == ComponentKind::VTimezone
                && child.property(&PropertyKind::TzId).is_some_and(|p| match &p.value {
                    Value::Text(values) => values.first().is_some_and(|v| v == tzid),
                    _ => false,
                })
        })
    }

    /// Check required/singleton/conflicting property rules for every
    /// component in the subtree.
    ///
    /// Violations are collected, not thrown, so a non-conformant
    /// calendar stays inspectable. The walk is iterative, adversarial
    /// nesting depth cannot exhaust the stack.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let mut pending = vec![self];

        while let Some(component) = pending.pop() {
            let rules = rules_for(&component.kind);

            for required in rules.required {
                if component.property(required).is_none() {
                    warnings.push(ValidationWarning::MissingProperty {
                        component: component.kind.clone(),
                        property: required.clone(),
                    });
                }
            }

            for singleton in rules.singleton {
                if component.properties_named(singleton).count() > 1 {
                    warnings.push(ValidationWarning::DuplicateProperty {
                        component: component.kind.clone(),
                        property: singleton.clone(),
                    });
                }
            }

            for (first, second) in rules.exclusive {
                if component.property(first).is_some() && component.property(second).is_some() {
                    warnings.push(ValidationWarning::ConflictingProperties {
                        component: component.kind.clone(),
                        first: first.clone(),
                        second: second.clone(),
                    });
                }
            }

            if component.kind == ComponentKind::VTimezone
                && component.first_child_of_kind(&ComponentKind::Standard).is_none()
                && component.first_child_of_kind(&ComponentKind::Daylight).is_none()
            {
                warnings.push(ValidationWarning::MissingChild {
                    component: component.kind.clone(),
                    expected: "STANDARD or DAYLIGHT",
                });
            }

            pending.extend(component.children.iter().rev());
        }

        warnings
    }
}

/// An advisory rule violation found by [`Component::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationWarning {
    /// A property the component kind requires is absent.
    #[error("{component} is missing required property {property}")]
    MissingProperty {
        /// Kind of the offending component
        component: ComponentKind,
        /// The missing property
        property: PropertyKind,
    },
    /// A property that may occur at most once occurs more than once.
    #[error("{component} has more than one {property}")]
    DuplicateProperty {
        /// Kind of the offending component
        component: ComponentKind,
        /// The duplicated property
        property: PropertyKind,
    },
    /// Two mutually exclusive properties are both present.
    #[error("{component} has both {first} and {second}")]
    ConflictingProperties {
        /// Kind of the offending component
        component: ComponentKind,
        /// One of the conflicting properties
        first: PropertyKind,
        /// The other conflicting property
        second: PropertyKind,
    },
    /// A child component the kind requires is absent.
    #[error("{component} is missing a {expected} sub-component")]
    MissingChild {
        /// Kind of the offending component
        component: ComponentKind,
        /// Human-readable description of what was expected
        expected: &'static str,
    },
}

struct ComponentRules {
    required: &'static [PropertyKind],
    singleton: &'static [PropertyKind],
    exclusive: &'static [(PropertyKind, PropertyKind)],
}

use PropertyKind as P;

const NO_RULES: ComponentRules =
    ComponentRules { required: &[], singleton: &[], exclusive: &[] };

const VCALENDAR_RULES: ComponentRules = ComponentRules {
    required: &[P::ProdId, P::Version],
    singleton: &[P::ProdId, P::Version, P::CalScale, P::Method],
    exclusive: &[],
};

const VEVENT_RULES: ComponentRules = ComponentRules {
    required: &[P::Uid, P::DtStamp],
    singleton: &[
        P::Uid,
        P::DtStamp,
        P::DtStart,
        P::DtEnd,
        P::Duration,
        P::Class,
        P::Created,
        P::Description,
        P::Geo,
        P::LastModified,
        P::Location,
        P::Organizer,
        P::Priority,
        P::RecurrenceId,
        P::Sequence,
        P::Status,
        P::Summary,
        P::Transp,
        P::Url,
    ],
    exclusive: &[(P::DtEnd, P::Duration)],
};

const VTODO_RULES: ComponentRules = ComponentRules {
    required: &[P::Uid, P::DtStamp],
    singleton: &[
        P::Uid,
        P::DtStamp,
        P::DtStart,
        P::Due,
        P::Duration,
        P::Class,
        P::Completed,
        P::Created,
        P::Description,
        P::Geo,
        P::LastModified,
        P::Location,
        P::Organizer,
        P::PercentComplete,
        P::Priority,
        P::RecurrenceId,
        P::Sequence,
        P::Status,
        P::Summary,
        P::Url,
    ],
    exclusive: &[(P::Due, P::Duration)],
};

const VJOURNAL_RULES: ComponentRules = ComponentRules {
    required: &[P::Uid, P::DtStamp],
    singleton: &[
        P::Uid,
        P::DtStamp,
        P::DtStart,
        P::Class,
        P::Created,
        P::LastModified,
        P::Organizer,
        P::RecurrenceId,
        P::Sequence,
        P::Status,
        P::Summary,
        P::Url,
    ],
    exclusive: &[],
};

const VFREEBUSY_RULES: ComponentRules = ComponentRules {
    required: &[P::Uid, P::DtStamp],
    singleton: &[P::Uid, P::DtStamp, P::Contact, P::DtStart, P::DtEnd, P::Organizer, P::Url],
    exclusive: &[],
};

const VTIMEZONE_RULES: ComponentRules = ComponentRules {
    required: &[P::TzId],
    singleton: &[P::TzId, P::LastModified, P::TzUrl],
    exclusive: &[],
};

const VALARM_RULES: ComponentRules = ComponentRules {
    required: &[P::Action, P::Trigger],
    singleton: &[P::Action, P::Trigger, P::Duration, P::Repeat],
    exclusive: &[],
};

const TZ_OBSERVANCE_RULES: ComponentRules = ComponentRules {
    required: &[P::DtStart, P::TzOffsetFrom, P::TzOffsetTo],
    singleton: &[P::DtStart, P::TzOffsetFrom, P::TzOffsetTo],
    exclusive: &[],
};

fn rules_for(kind: &ComponentKind) -> &'static ComponentRules {
    match kind {
        ComponentKind::VCalendar => &VCALENDAR_RULES,
        ComponentKind::VEvent => &VEVENT_RULES,
        ComponentKind::VTodo => &VTODO_RULES,
        ComponentKind::VJournal => &VJOURNAL_RULES,
        ComponentKind::VFreeBusy => &VFREEBUSY_RULES,
        ComponentKind::VTimezone => &VTIMEZONE_RULES,
        ComponentKind::VAlarm => &VALARM_RULES,
        ComponentKind::Standard | ComponentKind::Daylight => &TZ_OBSERVANCE_RULES,
        // The calendar-access draft components and extensions carry no
        // cardinality rules here.
        ComponentKind::VAgenda
        | ComponentKind::VQuery
        | ComponentKind::XName(_)
        | ComponentKind::Iana(_) => &NO_RULES,
    }
}
