//! Capability sources feeding the catalog
//!
//! Discovery sources enumerate what the host can build (node types and
//! members of manifest-described host types). Shortcut sources add extra
//! names on top: configured aliases, literal constants, `scalar*` short
//! names and `#asset` entries.

use crate::config::Config;
use crate::core::catalog::CatalogEntry;
use crate::core::error::FactoryError;
use crate::core::node::{GraphSpec, MemberAccess, NodeKind, NodeSpec};
use crate::core::stdlib;
use crate::core::value::{Value, ValueType};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Characters that disqualify a type or member name
static FORBIDDEN_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[`_<>]").ok());

/// Whether a type or member name contains forbidden punctuation
pub fn is_forbidden_name(name: &str) -> bool {
    FORBIDDEN_NAME.as_ref().is_some_and(|re| re.is_match(name))
}

/// When a source runs during a catalog build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStage {
    /// Enumerates constructible elements
    Discovery,
    /// Adds names derived from discovered entries or configuration
    Shortcut,
}

/// A provider of catalog entries
pub trait CapabilitySource: Send + Sync {
    fn name(&self) -> &'static str;

    fn stage(&self) -> SourceStage;

    /// Produce entries; `discovered` is empty for discovery sources
    fn entries(&self, discovered: &[CatalogEntry], config: &Config) -> Vec<CatalogEntry>;
}

/// The sources a default host scans, in catalog build order
pub fn default_sources() -> Vec<Box<dyn CapabilitySource>> {
    vec![
        Box::new(BuiltinNodeSource::new(stdlib::node_types())),
        Box::new(ManifestSource::new(stdlib::manifests())),
        Box::new(AliasSource),
        Box::new(LiteralSource),
        Box::new(ScalarShortcutSource),
        Box::new(AssetSource::new(stdlib::graph_assets())),
    ]
}

// =============================================================================
// BUILT-IN NODE TYPES
// =============================================================================

/// A registered node type
#[derive(Debug, Clone, Copy)]
pub struct NodeType {
    /// Dotted type path; the last segment names the catalog entry
    pub path: &'static str,
    pub build: fn() -> Result<NodeSpec, FactoryError>,
}

impl NodeType {
    pub const fn new(path: &'static str, build: fn() -> Result<NodeSpec, FactoryError>) -> Self {
        Self { path, build }
    }

    pub fn entry_name(&self) -> String {
        self.path.rsplit('.').next().unwrap_or(self.path).to_lowercase()
    }
}

pub struct BuiltinNodeSource {
    types: Vec<NodeType>,
}

impl BuiltinNodeSource {
    pub fn new(types: Vec<NodeType>) -> Self {
        Self { types }
    }
}

impl CapabilitySource for BuiltinNodeSource {
    fn name(&self) -> &'static str {
        "node types"
    }

    fn stage(&self) -> SourceStage {
        SourceStage::Discovery
    }

    fn entries(&self, _discovered: &[CatalogEntry], _config: &Config) -> Vec<CatalogEntry> {
        self.types
            .iter()
            .map(|t| {
                let build = t.build;
                CatalogEntry::new(&t.entry_name(), build)
            })
            .collect()
    }
}

// =============================================================================
// TYPE MANIFESTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    Class,
    Struct,
    Interface,
    Enum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: &'static str,
    /// Host type name as it appears in catalog names
    pub type_name: &'static str,
    pub ty: ValueType,
}

impl Param {
    pub fn new(name: &'static str, type_name: &'static str, ty: ValueType) -> Self {
        Self {
            name,
            type_name,
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    Constructor,
    Method { returns: Option<ValueType> },
    Property { ty: ValueType, writable: bool },
    Field { ty: ValueType, read_only: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberManifest {
    pub name: &'static str,
    pub kind: MemberKind,
    pub params: Vec<Param>,
    pub is_static: bool,
    pub generic: bool,
}

impl MemberManifest {
    fn with_kind(name: &'static str, kind: MemberKind) -> Self {
        Self {
            name,
            kind,
            params: Vec::new(),
            is_static: false,
            generic: false,
        }
    }

    pub fn constructor(params: Vec<Param>) -> Self {
        let mut m = Self::with_kind("ctor", MemberKind::Constructor);
        m.params = params;
        m
    }

    pub fn method(name: &'static str, params: Vec<Param>, returns: Option<ValueType>) -> Self {
        let mut m = Self::with_kind(name, MemberKind::Method { returns });
        m.params = params;
        m
    }

    pub fn property(name: &'static str, ty: ValueType, writable: bool) -> Self {
        Self::with_kind(name, MemberKind::Property { ty, writable })
    }

    pub fn field(name: &'static str, ty: ValueType, read_only: bool) -> Self {
        Self::with_kind(name, MemberKind::Field { ty, read_only })
    }

    pub fn statik(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn generic(mut self) -> Self {
        self.generic = true;
        self
    }

    fn param_list(&self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = self.params.iter().map(|p| p.type_name).collect();
            format!("({})", names.join(","))
        }
    }
}

/// Reflection-style description of a host type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeManifest {
    pub assembly: &'static str,
    pub namespace: Option<&'static str>,
    pub name: &'static str,
    pub shape: TypeShape,
    pub generic: bool,
    pub members: Vec<MemberManifest>,
}

impl TypeManifest {
    pub fn new(
        assembly: &'static str,
        namespace: Option<&'static str>,
        name: &'static str,
        shape: TypeShape,
    ) -> Self {
        Self {
            assembly,
            namespace,
            name,
            shape,
            generic: false,
            members: Vec::new(),
        }
    }

    pub fn generic(mut self) -> Self {
        self.generic = true;
        self
    }

    pub fn member(mut self, member: MemberManifest) -> Self {
        self.members.push(member);
        self
    }

    /// Whether the type itself may contribute entries
    fn is_scannable(&self, config: &Config) -> bool {
        if matches!(self.shape, TypeShape::Interface | TypeShape::Enum) || self.generic {
            return false;
        }
        if is_forbidden_name(self.name) {
            return false;
        }
        !config
            .exclude_namespaces
            .iter()
            .any(|excluded| self.namespace.is_none_or(|ns| ns.contains(excluded.as_str())))
    }
}

/// Node blueprint for one member access
fn member_node(owner: &str, member: &MemberManifest, access: MemberAccess) -> NodeSpec {
    let kind = NodeKind::Member {
        type_name: owner.to_string(),
        member: member.name.to_string(),
        access,
    };
    let title = match access {
        MemberAccess::Set => format!("Set {}.{}", owner, member.name),
        _ => format!("{}.{}", owner, member.name),
    };
    let mut spec = NodeSpec::new(kind, &title);
    let owner_ty = ValueType::named(owner);

    match (&member.kind, access) {
        (MemberKind::Constructor, _) => {
            spec = spec.control_in("enter").control_out("exit");
            for p in &member.params {
                let key = format!("%{}", p.name);
                spec = spec.value_in(&key, p.ty.clone(), Some(Value::default_for(&p.ty)));
            }
            spec = spec.value_out("result", owner_ty);
        }
        (MemberKind::Method { returns }, _) => {
            spec = spec.control_in("enter").control_out("exit");
            if !member.is_static {
                spec = spec.value_in("target", owner_ty, None);
            }
            for p in &member.params {
                let key = format!("%{}", p.name);
                spec = spec.value_in(&key, p.ty.clone(), Some(Value::default_for(&p.ty)));
            }
            if let Some(ty) = returns {
                spec = spec.value_out("result", ty.clone());
            }
        }
        (MemberKind::Property { ty, .. } | MemberKind::Field { ty, .. }, MemberAccess::Set) => {
            spec = spec.control_in("assign").control_out("assigned");
            if !member.is_static {
                spec = spec.value_in("target", owner_ty, None);
            }
            spec = spec
                .value_in("input", ty.clone(), Some(Value::default_for(ty)))
                .value_out("output", ty.clone());
        }
        (MemberKind::Property { ty, .. } | MemberKind::Field { ty, .. }, _) => {
            if !member.is_static {
                spec = spec.value_in("target", owner_ty, None);
            }
            spec = spec.value_out("value", ty.clone());
        }
    }
    spec
}

fn member_entry(name: String, owner: &'static str, member: &MemberManifest, access: MemberAccess) -> CatalogEntry {
    let member = member.clone();
    CatalogEntry::new(&name, move || Ok(member_node(owner, &member, access)))
}

/// Scans type manifests of the configured assemblies
pub struct ManifestSource {
    manifests: Vec<TypeManifest>,
}

impl ManifestSource {
    pub fn new(manifests: Vec<TypeManifest>) -> Self {
        Self { manifests }
    }
}

impl CapabilitySource for ManifestSource {
    fn name(&self) -> &'static str {
        "type manifests"
    }

    fn stage(&self) -> SourceStage {
        SourceStage::Discovery
    }

    fn entries(&self, _discovered: &[CatalogEntry], config: &Config) -> Vec<CatalogEntry> {
        let mut entries = Vec::new();
        let scanned = self
            .manifests
            .iter()
            .filter(|t| config.assemblies.iter().any(|a| a == t.assembly))
            .filter(|t| t.is_scannable(config));

        for t in scanned {
            for m in &t.members {
                match &m.kind {
                    MemberKind::Constructor => {
                        if m.generic {
                            continue;
                        }
                        let name = format!("{}.{}{}", t.name, m.name, m.param_list());
                        entries.push(member_entry(name, t.name, m, MemberAccess::Construct));
                    }
                    MemberKind::Method { .. } => {
                        if m.generic || is_forbidden_name(m.name) {
                            continue;
                        }
                        let name = format!("{}.{}{}", t.name, m.name, m.param_list());
                        entries.push(member_entry(name, t.name, m, MemberAccess::Invoke));
                    }
                    MemberKind::Property { writable, .. } => {
                        if is_forbidden_name(m.name) {
                            continue;
                        }
                        let name = format!("{}.{}", t.name, m.name);
                        entries.push(member_entry(name, t.name, m, MemberAccess::Get));
                        if *writable {
                            let name = format!("{}.set{}", t.name, m.name);
                            entries.push(member_entry(name, t.name, m, MemberAccess::Set));
                        }
                    }
                    MemberKind::Field { read_only, .. } => {
                        if is_forbidden_name(m.name) {
                            continue;
                        }
                        let name = format!("{}.{}", t.name, m.name);
                        entries.push(member_entry(name, t.name, m, MemberAccess::Get));
                        if !*read_only {
                            let name = format!("{}.set{}", t.name, m.name);
                            entries.push(member_entry(name, t.name, m, MemberAccess::Set));
                        }
                    }
                }
            }
        }
        entries
    }
}

// =============================================================================
// SHORTCUTS
// =============================================================================

/// Configured `from -> to` entry aliases
pub struct AliasSource;

impl CapabilitySource for AliasSource {
    fn name(&self) -> &'static str {
        "unit aliases"
    }

    fn stage(&self) -> SourceStage {
        SourceStage::Shortcut
    }

    fn entries(&self, discovered: &[CatalogEntry], config: &Config) -> Vec<CatalogEntry> {
        config
            .unit_aliases
            .iter()
            .filter_map(|alias| match discovered.iter().find(|e| e.name == alias.to) {
                Some(target) => Some(CatalogEntry::with_factory(&alias.from, target.factory())),
                None => {
                    warn!("unit alias {} points at unknown entry {}", alias.from, alias.to);
                    None
                }
            })
            .collect()
    }
}

/// Constant nodes reachable by short names
pub struct LiteralSource;

impl LiteralSource {
    fn literals() -> Vec<(&'static str, ValueType)> {
        let named = ValueType::named;
        let list = ValueType::list_of;
        vec![
            ("1", ValueType::Float),
            ("s", ValueType::String),
            ("int", ValueType::Int),
            ("bool", ValueType::Bool),
            ("listint", list(ValueType::Int)),
            ("listbool", list(ValueType::Bool)),
            ("listfloat", list(ValueType::Float)),
            ("listvector2", list(named("Vector2"))),
            ("listvector3", list(named("Vector3"))),
            ("listquaternion", list(named("Quaternion"))),
            ("listobject", list(ValueType::Object)),
            ("listtransform", list(named("Transform"))),
            ("listgameobject", list(named("GameObject"))),
        ]
    }
}

impl CapabilitySource for LiteralSource {
    fn name(&self) -> &'static str {
        "literals"
    }

    fn stage(&self) -> SourceStage {
        SourceStage::Shortcut
    }

    fn entries(&self, _discovered: &[CatalogEntry], _config: &Config) -> Vec<CatalogEntry> {
        Self::literals()
            .into_iter()
            .map(|(name, ty)| CatalogEntry::new(name, move || Ok(stdlib::literal(ty.clone()))))
            .collect()
    }
}

/// `scalarsum` is also reachable as `sum`
pub struct ScalarShortcutSource;

const SCALAR_PREFIX: &str = "scalar";

impl CapabilitySource for ScalarShortcutSource {
    fn name(&self) -> &'static str {
        "scalar shortcuts"
    }

    fn stage(&self) -> SourceStage {
        SourceStage::Shortcut
    }

    fn entries(&self, discovered: &[CatalogEntry], _config: &Config) -> Vec<CatalogEntry> {
        discovered
            .iter()
            .filter_map(|e| {
                let short = e.name.strip_prefix(SCALAR_PREFIX)?;
                (!short.is_empty()).then(|| CatalogEntry::with_factory(short, e.factory()))
            })
            .collect()
    }
}

/// A reusable graph that can be instanced as a composite node
#[derive(Debug, Clone, PartialEq)]
pub struct GraphAsset {
    pub name: String,
    pub body: GraphSpec,
}

/// `#name` entries for graph assets
pub struct AssetSource {
    assets: Vec<GraphAsset>,
}

impl AssetSource {
    pub fn new(assets: Vec<GraphAsset>) -> Self {
        Self { assets }
    }
}

impl CapabilitySource for AssetSource {
    fn name(&self) -> &'static str {
        "graph assets"
    }

    fn stage(&self) -> SourceStage {
        SourceStage::Shortcut
    }

    fn entries(&self, _discovered: &[CatalogEntry], _config: &Config) -> Vec<CatalogEntry> {
        self.assets
            .iter()
            .map(|asset| {
                let asset = asset.clone();
                let name = format!("#{}", asset.name.to_lowercase());
                CatalogEntry::new(&name, move || {
                    Ok(NodeSpec::composite(Some(asset.name.clone()), asset.body.clone()))
                })
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
