use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Raw identifier of an acquired scene-graph handle.
/// Unique across every scene in the process; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandleId(pub u64);

/// The release primitive of a scene graph. Invoked exactly once per acquired handle.
pub trait Release {
    fn release(&self, id: HandleId);
}

/// Marker types naming what a [`Handle`] refers to.
pub mod kind {
    #[derive(Debug)]
    pub enum Face {}
    #[derive(Debug)]
    pub enum Loop {}
    #[derive(Debug)]
    pub enum CoEdge {}
    #[derive(Debug)]
    pub enum Edge {}
    #[derive(Debug)]
    pub enum Curve {}
    #[derive(Debug)]
    pub enum Surface {}
    #[derive(Debug)]
    pub enum View {}
    #[derive(Debug)]
    pub enum ViewTransform {}
}

/// Exclusively owned reference to a scene-graph entity.
///
/// Handles cannot be cloned. Dropping one releases it back to the scene that
/// issued it, so every acquired handle is released exactly once on every
/// path, including early returns through `?`.
pub struct Handle<'g, K> {
    id: HandleId,
    owner: &'g dyn Release,
    _kind: PhantomData<fn() -> K>,
}

impl<'g, K> Handle<'g, K> {
    /// Wrap an identifier freshly acquired from `owner`. Only scene-graph
    /// implementations should call this.
    pub fn new(id: HandleId, owner: &'g dyn Release) -> Self {
        Self {
            id,
            owner,
            _kind: PhantomData,
        }
    }

    pub fn id(&self) -> HandleId {
        self.id
    }
}

impl<K> Drop for Handle<'_, K> {
    fn drop(&mut self) {
        self.owner.release(self.id);
    }
}

impl<K> fmt::Debug for Handle<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = std::any::type_name::<K>().rsplit("::").next().unwrap_or("?");
        write!(f, "{}Handle({})", kind, self.id.0)
    }
}

pub type FaceHandle<'g> = Handle<'g, kind::Face>;
pub type LoopHandle<'g> = Handle<'g, kind::Loop>;
pub type CoEdgeHandle<'g> = Handle<'g, kind::CoEdge>;
pub type EdgeHandle<'g> = Handle<'g, kind::Edge>;
pub type CurveHandle<'g> = Handle<'g, kind::Curve>;
pub type SurfaceHandle<'g> = Handle<'g, kind::Surface>;
pub type ViewHandle<'g> = Handle<'g, kind::View>;
pub type ViewTransformHandle<'g> = Handle<'g, kind::ViewTransform>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        released: RefCell<Vec<HandleId>>,
    }

    impl Release for Recorder {
        fn release(&self, id: HandleId) {
            self.released.borrow_mut().push(id);
        }
    }

    #[test]
    fn test_drop_releases_once() {
        let recorder = Recorder::default();
        {
            let h: FaceHandle<'_> = Handle::new(HandleId(7), &recorder);
            assert_eq!(h.id(), HandleId(7));
        }
        assert_eq!(*recorder.released.borrow(), vec![HandleId(7)]);
    }

    #[test]
    fn test_move_transfers_ownership() {
        let recorder = Recorder::default();
        let h: EdgeHandle<'_> = Handle::new(HandleId(3), &recorder);
        let holder = vec![h];
        assert!(recorder.released.borrow().is_empty());
        drop(holder);
        assert_eq!(recorder.released.borrow().len(), 1);
    }

    #[test]
    fn test_debug_names_kind() {
        let recorder = Recorder::default();
        let h: LoopHandle<'_> = Handle::new(HandleId(11), &recorder);
        assert_eq!(format!("{:?}", h), "LoopHandle(11)");
    }
}
