use super::descriptor::ActionDescriptor;
use crate::controller::ControllerMetadata;
use crate::ids::ControllerId;
use http::Method;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Methods whose candidate lists are precomputed at build time.
///
/// Any other method is answered by a scan over all descriptors on each call;
/// the result is never stored, so memory stays bounded to this table.
pub const COMMON_VERBS: [Method; 3] = [Method::GET, Method::PUT, Method::POST];

/// Maximum candidates held inline during one selection.
pub const MAX_INLINE_CANDIDATES: usize = 8;

/// Borrowed candidate list for one selection (stack-allocated for ≤8 handlers).
pub type Candidates<'a> = SmallVec<[&'a Arc<ActionDescriptor>; MAX_INLINE_CANDIDATES]>;

/// Descriptors sharing one case-folded name, in declaration order.
#[derive(Debug)]
pub(crate) struct NameGroup {
    pub(crate) descriptors: Vec<Arc<ActionDescriptor>>,
}

/// Precomputed, immutable action table for one controller identity.
#[derive(Debug)]
pub struct ActionInventory {
    controller_id: ControllerId,
    controller: Arc<str>,
    descriptors: Vec<Arc<ActionDescriptor>>,
    /// Groups in first-appearance order, for deterministic export
    name_groups: Vec<NameGroup>,
    /// Case-folded name → index into `name_groups`
    name_index: HashMap<Box<str>, usize>,
    /// One bucket per entry of [`COMMON_VERBS`]
    by_common_verb: [Vec<Arc<ActionDescriptor>>; 3],
}

/// Per-character lowercase fold, borrowed when nothing changes.
///
/// Folds `char` by `char` so it agrees exactly with [`names_eq`].
#[inline]
pub(crate) fn fold_name(name: &str) -> Cow<'_, str> {
    if name.is_ascii() {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Owned(name.to_ascii_lowercase());
        }
        return Cow::Borrowed(name);
    }
    if name.chars().all(|c| c.to_lowercase().eq(std::iter::once(c))) {
        return Cow::Borrowed(name);
    }
    Cow::Owned(name.chars().flat_map(char::to_lowercase).collect())
}

/// Case-insensitive name comparison, Unicode aware (`Über` == `über`).
#[inline]
pub(crate) fn names_eq(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl ActionInventory {
    /// Build the inventory for a controller.
    ///
    /// Deterministic for a given handler list. Framework and synthesized
    /// handlers are skipped; everything else becomes a descriptor.
    #[must_use]
    pub fn build(controller: &dyn ControllerMetadata) -> Self {
        let controller_name: Arc<str> = Arc::from(controller.name());

        let descriptors: Vec<Arc<ActionDescriptor>> = controller
            .handlers()
            .iter()
            .filter(|h| {
                let keep = h.is_action_candidate();
                if !keep {
                    debug!(
                        controller = %controller_name,
                        handler = %h.name,
                        origin = ?h.origin,
                        "Skipping non-action handler"
                    );
                }
                keep
            })
            .map(|h| Arc::new(ActionDescriptor::from_handler(&controller_name, h)))
            .collect();

        let mut name_groups: Vec<NameGroup> = Vec::new();
        let mut name_index: HashMap<Box<str>, usize> = HashMap::new();
        for descriptor in &descriptors {
            let key: Box<str> = fold_name(descriptor.name()).into();
            match name_index.get(&key) {
                Some(&idx) => name_groups[idx].descriptors.push(Arc::clone(descriptor)),
                None => {
                    name_index.insert(key, name_groups.len());
                    name_groups.push(NameGroup {
                        descriptors: vec![Arc::clone(descriptor)],
                    });
                }
            }
        }

        let by_common_verb = COMMON_VERBS.map(|verb| {
            descriptors
                .iter()
                .filter(|d| d.supports(&verb))
                .cloned()
                .collect::<Vec<_>>()
        });

        info!(
            controller = %controller_name,
            controller_id = %controller.id(),
            actions = descriptors.len(),
            names = name_groups.len(),
            get = by_common_verb[0].len(),
            put = by_common_verb[1].len(),
            post = by_common_verb[2].len(),
            "Action inventory built"
        );

        Self {
            controller_id: controller.id(),
            controller: controller_name,
            descriptors,
            name_groups,
            name_index,
            by_common_verb,
        }
    }

    #[inline]
    #[must_use]
    pub fn controller_id(&self) -> ControllerId {
        self.controller_id
    }

    #[inline]
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    #[inline]
    pub(crate) fn controller_arc(&self) -> &Arc<str> {
        &self.controller
    }

    /// All descriptors in declaration order.
    #[inline]
    #[must_use]
    pub fn descriptors(&self) -> &[Arc<ActionDescriptor>] {
        &self.descriptors
    }

    /// Descriptors whose name matches case-insensitively; empty when unknown.
    #[must_use]
    pub fn by_name(&self, name: &str) -> &[Arc<ActionDescriptor>] {
        let key = fold_name(name);
        self.name_index
            .get(&*key)
            .map(|&idx| self.name_groups[idx].descriptors.as_slice())
            .unwrap_or(&[])
    }

    /// Precomputed bucket for a common verb, `None` for any other method.
    #[inline]
    #[must_use]
    pub fn by_common_verb(&self, method: &Method) -> Option<&[Arc<ActionDescriptor>]> {
        COMMON_VERBS
            .iter()
            .position(|verb| verb == method)
            .map(|idx| self.by_common_verb[idx].as_slice())
    }

    /// Candidates supporting `method`, from the precomputed table when possible.
    #[must_use]
    pub fn candidates_for_verb(&self, method: &Method) -> Candidates<'_> {
        match self.by_common_verb(method) {
            Some(bucket) => bucket.iter().collect(),
            None => self
                .descriptors
                .iter()
                .filter(|d| d.supports(method))
                .collect(),
        }
    }

    pub(crate) fn name_groups(&self) -> &[NameGroup] {
        &self.name_groups
    }
}
