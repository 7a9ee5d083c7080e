/// Static descriptor of a declared error kind.
///
/// Every kind produced by `define_layer!`, `extend_kind!` or
/// `extend_system_kind!` owns one `KindId`, built at compile time and linked
/// to the descriptor of the kind it derives from. The resulting chain is what
/// makes a kind catchable as any of its ancestors.
///
/// # Identity
///
/// Two descriptors are equal when they were declared by the same type in the
/// same module (`module` + `ident`). The rendered `name` is not part of the
/// identity: every layer has its own `logic_error`, and those are distinct
/// kinds.
///
/// ```
/// use errlayer::KindId;
///
/// const BASE: KindId = KindId::new("base", "app", "Base", None);
/// const LEAF: KindId = KindId::new("leaf", "app", "Leaf", Some(&BASE));
///
/// assert!(LEAF.is_a(&BASE));
/// assert!(!BASE.is_a(&LEAF));
/// ```
#[derive(Clone, Copy)]
pub struct KindId {
    name: &'static str,
    module: &'static str,
    ident: &'static str,
    parent: Option<&'static KindId>,
}

impl KindId {
    /// Construct a descriptor.
    ///
    /// `name` is the text used when rendering messages, `module` and `ident`
    /// locate the declaring type, `parent` is the kind this one is-a.
    pub const fn new(
        name: &'static str,
        module: &'static str,
        ident: &'static str,
        parent: Option<&'static KindId>,
    ) -> Self {
        Self { name, module, ident, parent }
    }

    /// Rendered name, the outermost wrapper of this kind's messages.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Module path of the declaring type.
    #[inline]
    pub const fn module(&self) -> &'static str {
        self.module
    }

    /// Identifier of the declaring type.
    #[inline]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// The kind this one derives from, `None` for a taxonomy root.
    #[inline]
    pub const fn parent(&self) -> Option<&'static KindId> {
        self.parent
    }

    /// True if `self` is `ancestor` or derives from it, directly or not.
    pub fn is_a(&self, ancestor: &KindId) -> bool {
        self.ancestors().any(|k| k == ancestor)
    }

    /// Walk the chain from `self` (included) up to the taxonomy root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Number of links between `self` and its taxonomy root.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// The root of the taxonomy this kind belongs to.
    pub fn root(&self) -> &KindId {
        let mut cur = self;
        while let Some(parent) = cur.parent {
            cur = parent;
        }
        cur
    }
}

/// Iterator returned by [`KindId::ancestors`].
pub struct Ancestors<'a> {
    next: Option<&'a KindId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a KindId;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        self.next = cur.parent.map(|p| p as &KindId);
        Some(cur)
    }
}

impl PartialEq for KindId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ident == other.ident && self.module == other.module
    }
}

impl Eq for KindId {}

impl core::hash::Hash for KindId {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.module.hash(state);
        self.ident.hash(state);
    }
}

impl core::fmt::Debug for KindId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}::{}({})", self.module, self.ident, self.name)
    }
}

impl core::fmt::Display for KindId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name)
    }
}
