pub mod block;
pub mod board;
pub mod bounds;
pub mod drag;
pub mod geometry;
pub mod gesture;
pub mod options;
pub mod registry;
pub mod resolve;
pub mod rotate;
pub mod snap;
pub mod transition;

pub use block::{find_by_id, replace_by_id, Block, BlockId, BlockLike, Position, Size};
pub use board::{Board, BoardEffects, BoardHooks, BoardSnapshot};
pub use bounds::{is_in_bound, ContainerRect, Offset};
pub use drag::DragController;
pub use geometry::{
    collides, collides_with_any, has_circle_collision, has_obb_collision, has_rectangle_collision,
    CollisionMode,
};
pub use gesture::{container_coords, CollisionUpdate, GestureEnd, GestureKind, PointerSample};
pub use options::{BoardOptions, BoundsOptions, CollisionOptions, DragOptions, OptionsError, RotateOptions};
pub use registry::{detect_all, CollisionRegistry, CollisionSubscription, SharedCollisionRegistry};
pub use resolve::{resolve, Resolution};
pub use rotate::RotateController;
pub use snap::{snap_position, SnapOptions};
pub use transition::{Animator, Frame};
