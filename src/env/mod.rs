//! Episode environment for agents and RL training loops.
//!
//! ## Key Types
//!
//! - `HotZoneEnv`: reset/step over a fixed action vocabulary
//! - `StepResult`: observation, shaped reward, done flag and step details
//! - `DiscardPolicy`: who decides which cards go at the hand limit
//! - `Snapshot`: bincode-serializable capture of a running episode
//!
//! ## Usage
//!
//! ```rust
//! use hotzone::core::GameConfig;
//! use hotzone::env::HotZoneEnv;
//!
//! let mut env = HotZoneEnv::europe(GameConfig::default()).unwrap();
//! let obs = env.reset(Some(3)).unwrap();
//! assert_eq!(obs.len(), 849);
//!
//! let index = env.valid_action_mask().iter().position(|&legal| legal).unwrap();
//! let step = env.step(index).unwrap();
//! assert!(!step.done);
//! ```

pub mod discard;
pub mod environment;
pub mod observation;
pub mod playout;
pub mod reward;
pub mod snapshot;

pub use discard::{DiscardPolicy, HeuristicDiscard};
pub use environment::{HotZoneEnv, StepInfo, StepResult};
pub use observation::{encode_observation, observation_width, CITY_FEATURES, GLOBAL_FEATURES};
pub use playout::{play_episode, EpisodeSummary};
pub use reward::{shape_reward, RewardBreakdown, LOSS_REWARD, WIN_REWARD};
pub use snapshot::Snapshot;
