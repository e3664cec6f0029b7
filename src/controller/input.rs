use rustc_hash::FxHashMap;

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    Z,
    C,
    X,
    Escape,
    LeftShift,
}

impl Key {
    pub const ALL: [Key; 12] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Q,
        Key::E,
        Key::R,
        Key::Z,
        Key::C,
        Key::X,
        Key::Escape,
        Key::LeftShift,
    ];
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyState {
    current: bool,
    previous: bool,
}

/// Edge-detecting keyboard state.
///
/// Only keys registered with [`add_key`](Self::add_key) are tracked; every
/// query on an untracked key reports "not pressed".
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: FxHashMap<Key, KeyState>,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks every key in [`Key::ALL`].
    #[must_use]
    pub fn with_all_keys() -> Self {
        let mut input = Self::new();
        for key in Key::ALL {
            input.add_key(key);
        }
        input
    }

    /// Starts tracking `key`, released.
    pub fn add_key(&mut self, key: Key) {
        self.keys.insert(key, KeyState::default());
    }

    /// Starts a new frame: the current state becomes the previous one and
    /// `poll` supplies the new current state of each tracked key.
    pub fn process(&mut self, mut poll: impl FnMut(Key) -> bool) {
        for (&key, state) in &mut self.keys {
            state.previous = state.current;
            state.current = poll(key);
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys.get(&key).is_some_and(|s| s.current)
    }

    #[must_use]
    pub fn is_released(&self, key: Key) -> bool {
        !self.is_pressed(key)
    }

    /// Released last frame, pressed this frame.
    #[must_use]
    pub fn just_pressed(&self, key: Key) -> bool {
        self.keys.get(&key).is_some_and(|s| s.current && !s.previous)
    }

    /// Pressed last frame, released this frame.
    #[must_use]
    pub fn just_released(&self, key: Key) -> bool {
        self.keys.get(&key).is_some_and(|s| !s.current && s.previous)
    }
}
