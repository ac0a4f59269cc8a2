/// Events emitted by a lifecycle cell during state transitions.
///
/// These events are passed to the observer set via
/// [`SingletonCell::set_observer`](crate::SingletonCell::set_observer). The
/// `Clone` derive allows observers to store or forward events if needed.
///
/// [`Construct`](LifecycleEvent::Construct) is the instrumentation point for
/// lazy construction: it fires if and only if the slow, lock-acquiring path
/// ran the default-construction hook. It never fires on the fast path of a
/// get and never for an explicit default push.
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    /// The slow path of a lazy get ran the default-construction hook.
    Construct {
        /// The type whose base instance was constructed
        type_name: &'static str,
    },

    /// A base instance was explicitly assigned.
    Set {
        /// The type whose base slot was filled
        type_name: &'static str,
    },

    /// The base slot was explicitly cleared.
    Clear {
        /// The type whose base slot was emptied
        type_name: &'static str,
    },

    /// An override was layered above the base slot.
    Push {
        /// The type whose stack grew
        type_name: &'static str,
        /// Stack depth after the push
        depth: usize,
    },

    /// The top override was removed.
    Pop {
        /// The type whose stack shrank
        type_name: &'static str,
        /// Stack depth after the pop
        depth: usize,
    },
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleEvent::Construct { type_name } => {
                write!(f, "construct {{ type_name: {} }}", type_name)
            }
            LifecycleEvent::Set { type_name } => {
                write!(f, "set {{ type_name: {} }}", type_name)
            }
            LifecycleEvent::Clear { type_name } => {
                write!(f, "clear {{ type_name: {} }}", type_name)
            }
            LifecycleEvent::Push { type_name, depth } => {
                write!(f, "push {{ type_name: {}, depth: {} }}", type_name, depth)
            }
            LifecycleEvent::Pop { type_name, depth } => {
                write!(f, "pop {{ type_name: {}, depth: {} }}", type_name, depth)
            }
        }
    }
}
