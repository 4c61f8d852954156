//! The message catalog.
//!
//! [`MessageCatalog`] maps a message key + locale to a template string. It
//! is built once at startup (normally via [`builtin`]) and immutable
//! afterwards; the renderer and dispatcher share it behind an `Arc`.
//! Placeholders use `{snake_case}` names drawn from
//! [`depot_core::ParamKey`].

use std::collections::HashMap;

use depot_core::kind::ALL_KINDS;
use depot_core::{Locale, NotificationKind, SUPPORTED_LOCALES};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable key/locale -> template mapping.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    templates: HashMap<String, HashMap<Locale, String>>,
}

impl MessageCatalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The template registered for `key` in exactly `locale`, if any.
    /// Fallback policy lives in the renderer, not here.
    pub fn lookup(&self, key: &str, locale: Locale) -> Option<&str> {
        self.templates
            .get(key)
            .and_then(|by_locale| by_locale.get(&locale))
            .map(String::as_str)
    }

    /// Whether `key` is registered in any locale.
    pub fn contains_key(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Write-side of [`MessageCatalog`]; consumed by [`CatalogBuilder::build`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    templates: HashMap<String, HashMap<Locale, String>>,
}

impl CatalogBuilder {
    /// Register `text` for `key` in `locale`, replacing any earlier entry.
    pub fn template(
        mut self,
        key: impl Into<String>,
        locale: Locale,
        text: impl Into<String>,
    ) -> Self {
        self.templates
            .entry(key.into())
            .or_default()
            .insert(locale, text.into());
        self
    }

    pub fn build(self) -> MessageCatalog {
        MessageCatalog {
            templates: self.templates,
        }
    }
}

// ---------------------------------------------------------------------------
// Builtin templates
// ---------------------------------------------------------------------------

/// The full builtin catalog: title and message templates for every
/// [`NotificationKind`] in every supported locale.
pub fn builtin() -> MessageCatalog {
    let mut builder = MessageCatalog::builder();
    for kind in ALL_KINDS {
        for locale in SUPPORTED_LOCALES {
            let (title, message) = builtin_texts(*kind, *locale);
            builder = builder
                .template(kind.title_key(), *locale, title)
                .template(kind.message_key(), *locale, message);
        }
    }
    builder.build()
}

/// Builtin (title, message) pair per kind and locale. The exhaustive match
/// keeps the table gap-free: a new kind or locale fails to compile until
/// its texts exist.
fn builtin_texts(kind: NotificationKind, locale: Locale) -> (&'static str, &'static str) {
    use Locale::{De, En, Fr};
    use NotificationKind as K;

    match (kind, locale) {
        // -- assignment -----------------------------------------------------
        (K::AssetAssigned, En) => (
            "Asset assigned",
            "Asset {asset_name} ({asset_tag}) has been assigned to {user_name}.",
        ),
        (K::AssetAssigned, De) => (
            "Gerät zugewiesen",
            "Das Gerät {asset_name} ({asset_tag}) wurde {user_name} zugewiesen.",
        ),
        (K::AssetAssigned, Fr) => (
            "Actif attribué",
            "L'actif {asset_name} ({asset_tag}) a été attribué à {user_name}.",
        ),
        (K::AssetReassigned, En) => (
            "Asset reassigned",
            "Asset {asset_name} ({asset_tag}) has been reassigned to {user_name}.",
        ),
        (K::AssetReassigned, De) => (
            "Gerät neu zugewiesen",
            "Das Gerät {asset_name} ({asset_tag}) wurde {user_name} neu zugewiesen.",
        ),
        (K::AssetReassigned, Fr) => (
            "Actif réattribué",
            "L'actif {asset_name} ({asset_tag}) a été réattribué à {user_name}.",
        ),
        (K::AssetUnassigned, En) => (
            "Asset returned",
            "Asset {asset_name} ({asset_tag}) is no longer assigned to you.",
        ),
        (K::AssetUnassigned, De) => (
            "Gerät zurückgegeben",
            "Das Gerät {asset_name} ({asset_tag}) ist Ihnen nicht mehr zugewiesen.",
        ),
        (K::AssetUnassigned, Fr) => (
            "Actif restitué",
            "L'actif {asset_name} ({asset_tag}) ne vous est plus attribué.",
        ),

        // -- status ---------------------------------------------------------
        (K::AssetActivated, En) => (
            "Asset activated",
            "Asset {asset_name} ({asset_tag}) is now active.",
        ),
        (K::AssetActivated, De) => (
            "Gerät aktiviert",
            "Das Gerät {asset_name} ({asset_tag}) ist jetzt aktiv.",
        ),
        (K::AssetActivated, Fr) => (
            "Actif activé",
            "L'actif {asset_name} ({asset_tag}) est maintenant actif.",
        ),
        (K::AssetUnderMaintenance, En) => (
            "Asset under maintenance",
            "Asset {asset_name} ({asset_tag}) has been moved to maintenance.",
        ),
        (K::AssetUnderMaintenance, De) => (
            "Gerät in Wartung",
            "Das Gerät {asset_name} ({asset_tag}) befindet sich jetzt in Wartung.",
        ),
        (K::AssetUnderMaintenance, Fr) => (
            "Actif en maintenance",
            "L'actif {asset_name} ({asset_tag}) est passé en maintenance.",
        ),
        (K::AssetDisposed, En) => (
            "Asset disposed",
            "Asset {asset_name} ({asset_tag}) has been disposed.",
        ),
        (K::AssetDisposed, De) => (
            "Gerät entsorgt",
            "Das Gerät {asset_name} ({asset_tag}) wurde entsorgt.",
        ),
        (K::AssetDisposed, Fr) => (
            "Actif mis au rebut",
            "L'actif {asset_name} ({asset_tag}) a été mis au rebut.",
        ),
        (K::AssetLost, En) => (
            "Asset reported lost",
            "Asset {asset_name} ({asset_tag}) has been reported lost.",
        ),
        (K::AssetLost, De) => (
            "Gerät als verloren gemeldet",
            "Das Gerät {asset_name} ({asset_tag}) wurde als verloren gemeldet.",
        ),
        (K::AssetLost, Fr) => (
            "Actif déclaré perdu",
            "L'actif {asset_name} ({asset_tag}) a été déclaré perdu.",
        ),
        (K::AssetStatusChanged, En) => (
            "Asset status changed",
            "Asset {asset_name} ({asset_tag}) changed status from {old_status} to {new_status}.",
        ),
        (K::AssetStatusChanged, De) => (
            "Gerätestatus geändert",
            "Das Gerät {asset_name} ({asset_tag}) wechselte den Status von {old_status} zu {new_status}.",
        ),
        (K::AssetStatusChanged, Fr) => (
            "Statut de l'actif modifié",
            "L'actif {asset_name} ({asset_tag}) est passé du statut {old_status} à {new_status}.",
        ),

        // -- condition ------------------------------------------------------
        (K::AssetConditionDamaged, En) => (
            "Asset damaged",
            "Asset {asset_name} ({asset_tag}) has been marked as damaged.",
        ),
        (K::AssetConditionDamaged, De) => (
            "Gerät beschädigt",
            "Das Gerät {asset_name} ({asset_tag}) wurde als beschädigt markiert.",
        ),
        (K::AssetConditionDamaged, Fr) => (
            "Actif endommagé",
            "L'actif {asset_name} ({asset_tag}) a été marqué comme endommagé.",
        ),
        (K::AssetConditionPoor, En) => (
            "Asset condition poor",
            "Asset {asset_name} ({asset_tag}) is now in poor condition.",
        ),
        (K::AssetConditionPoor, De) => (
            "Gerätezustand schlecht",
            "Das Gerät {asset_name} ({asset_tag}) ist jetzt in schlechtem Zustand.",
        ),
        (K::AssetConditionPoor, Fr) => (
            "État de l'actif médiocre",
            "L'actif {asset_name} ({asset_tag}) est maintenant en mauvais état.",
        ),
        (K::AssetConditionChanged, En) => (
            "Asset condition changed",
            "Asset {asset_name} ({asset_tag}) changed condition from {old_condition} to {new_condition}.",
        ),
        (K::AssetConditionChanged, De) => (
            "Gerätezustand geändert",
            "Das Gerät {asset_name} ({asset_tag}) wechselte den Zustand von {old_condition} zu {new_condition}.",
        ),
        (K::AssetConditionChanged, Fr) => (
            "État de l'actif modifié",
            "L'actif {asset_name} ({asset_tag}) est passé de l'état {old_condition} à {new_condition}.",
        ),

        // -- deadlines ------------------------------------------------------
        (K::WarrantyExpiringSoon, En) => (
            "Warranty expiring soon",
            "The warranty for {asset_name} ({asset_tag}) expires on {due_date} (within {days} days).",
        ),
        (K::WarrantyExpiringSoon, De) => (
            "Garantie läuft bald ab",
            "Die Garantie für {asset_name} ({asset_tag}) läuft am {due_date} ab (innerhalb von {days} Tagen).",
        ),
        (K::WarrantyExpiringSoon, Fr) => (
            "Garantie bientôt expirée",
            "La garantie de {asset_name} ({asset_tag}) expire le {due_date} (dans {days} jours).",
        ),
        (K::WarrantyExpired, En) => (
            "Warranty expired",
            "The warranty for {asset_name} ({asset_tag}) expired on {due_date}.",
        ),
        (K::WarrantyExpired, De) => (
            "Garantie abgelaufen",
            "Die Garantie für {asset_name} ({asset_tag}) ist am {due_date} abgelaufen.",
        ),
        (K::WarrantyExpired, Fr) => (
            "Garantie expirée",
            "La garantie de {asset_name} ({asset_tag}) a expiré le {due_date}.",
        ),
        (K::MaintenanceDueSoon, En) => (
            "Maintenance due soon",
            "Maintenance for {asset_name} ({asset_tag}) is scheduled for {due_date} (within {days} days).",
        ),
        (K::MaintenanceDueSoon, De) => (
            "Wartung bald fällig",
            "Die Wartung für {asset_name} ({asset_tag}) ist für den {due_date} geplant (in {days} Tagen).",
        ),
        (K::MaintenanceDueSoon, Fr) => (
            "Maintenance bientôt due",
            "La maintenance de {asset_name} ({asset_tag}) est prévue le {due_date} (dans {days} jours).",
        ),
        (K::MaintenanceOverdue, En) => (
            "Maintenance overdue",
            "Maintenance for {asset_name} ({asset_tag}) was scheduled for {due_date} and is overdue.",
        ),
        (K::MaintenanceOverdue, De) => (
            "Wartung überfällig",
            "Die Wartung für {asset_name} ({asset_tag}) war für den {due_date} geplant und ist überfällig.",
        ),
        (K::MaintenanceOverdue, Fr) => (
            "Maintenance en retard",
            "La maintenance de {asset_name} ({asset_tag}) était prévue le {due_date} et est en retard.",
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
