use itertools::Itertools;
use rand::Rng;

/// Board geometry. The winning-combination table below is written against a
/// 5x5 layout, so these are coupled constants rather than free parameters.
pub const CARDS_TALL: usize = 5;
pub const CARDS_WIDE: usize = 5;
pub const CARD_SIZE: usize = CARDS_TALL * CARDS_WIDE;

/// Sequence index of the free space: the center cell (row 2, column 2).
pub const FREE_SPACE_INDEX: usize = CARD_SIZE / 2;
pub const FREE_SPACE_ID: &str = "free space";

/// Soft hyphens in labels mark where long words may wrap in a narrow cell.
/// They are cosmetic only and are stripped when deriving a space's id.
const SOFT_HYPHEN: char = '\u{ad}';

/// Every way to win: all 5 rows, all 5 columns, and the 2 main diagonals,
/// each as sequence indices into the card (index i sits at row i / 5,
/// column i % 5).
pub const WINNING_COMBOS: [[usize; 5]; 12] = [
    // Rows
    [0, 1, 2, 3, 4],
    [5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14],
    [15, 16, 17, 18, 19],
    [20, 21, 22, 23, 24],
    // Columns
    [0, 5, 10, 15, 20],
    [1, 6, 11, 16, 21],
    [2, 7, 12, 17, 22],
    [3, 8, 13, 18, 23],
    [4, 9, 14, 19, 24],
    // Diagonals
    [0, 6, 12, 18, 24],
    [4, 8, 12, 16, 20],
];

/// The stock label pool the demo binary and the wasm boundary deal from.
/// Any pool of at least 24 distinct labels works; this one has 36.
pub const DEFAULT_POOL: [&str; 36] = [
    "Viral",
    "Crowd\u{ad}source",
    "Buzz\u{ad}word",
    "Engage\u{ad}ment",
    "Analytics",
    "Fusion Tables",
    "CMS",
    "Veri\u{ad}fi\u{ad}cation",
    "Respon\u{ad}sive design",
    "Comments",
    "Aggreg\u{ad}ation",
    "Mobile-first",
    "Social",
    "Knight Foun\u{ad}da\u{ad}tion",
    "iPhone 6",
    "Pivot",
    "User stories",
    "Audience",
    "Story\u{ad}telling",
    "Show your work",
    "Storify",
    "FOIA",
    "User-gener\u{ad}ated content",
    "Twitter verified",
    "Moder\u{ad}ation",
    "Karaoke",
    "Someone defending Google+",
    "Google Glass",
    "iOS 7",
    "Info\u{ad}graphics",
    "Network",
    "Big Data",
    "New revenue streams",
    "Public interest",
    "Google Hangout",
    "Snow Fall",
];

/// A single cell on the bingo card.
/// This is the only per-cell state that is remembered between events.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Space {
    /// Stable identity: the label with soft hyphens stripped. Unique within
    /// a card; collaborators key their per-cell render caches on it.
    pub id: String,
    /// Display text, soft hyphens included.
    pub label: String,
    pub checked: bool,
    /// A locked space stays checked no matter what the user does. Exactly
    /// one space per card is locked: the free space.
    pub locked: bool,
    /// 1-based sort key in layout order. Not a spatial index.
    pub order: u32,
}

impl Space {
    fn from_label(label: &str, order: u32) -> Self {
        Space {
            id: label.replace(SOFT_HYPHEN, ""),
            label: label.to_string(),
            checked: false,
            locked: false,
            order,
        }
    }

    fn free_space(order: u32) -> Self {
        Space {
            id: FREE_SPACE_ID.to_string(),
            label: FREE_SPACE_ID.to_string(),
            checked: true,
            locked: true,
            order,
        }
    }
}

/// Errors surfaced by card generation, rehydration, and toggling. All are
/// synchronous and returned to the immediate caller; none are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("label pool has {found} entries, {required} are required")]
    InsufficientPool { required: usize, found: usize },
    #[error("duplicate space id: {0}")]
    DuplicateId(String),
    #[error("no space with id: {0}")]
    InvalidToggleTarget(String),
}

/// Change notification delivered to subscribers, synchronously, after the
/// mutation it describes has been fully applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    SpaceChanged { id: String, checked: bool },
    Reset,
}

/// The full card for one game: 25 spaces in layout order, plus the
/// subscriber list used to notify collaborators of changes.
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Card {
    pub spaces: Vec<Space>,
    /// Runtime wiring, not state: never serialized, and rehydrated cards
    /// come back with no subscribers until the owner reattaches them.
    #[serde(skip)]
    subscribers: Vec<Box<dyn FnMut(&CardEvent)>>,
}

// --- Card Implementation (orchestrating the logic) ---

impl Card {
    /// Deals a fresh card from a pool of candidate labels.
    ///
    /// 1. Rejects pools too small to fill the board without repeats.
    /// 2. Shuffles a copy of the pool and takes the first 24 labels.
    /// 3. Splices the pre-checked, locked free space in at the center.
    /// 4. Numbers the spaces 1..=25 in final layout order.
    /// 5. Rejects any duplicate ids (repeated pool labels are never
    ///    silently collapsed).
    ///
    /// On error nothing has been built, so the caller's previous card, if
    /// any, is untouched.
    pub fn deal<S: AsRef<str>>(pool: &[S], rng: &mut impl Rng) -> Result<Card, CardError> {
        let required = CARD_SIZE - 1;
        if pool.len() < required {
            return Err(CardError::InsufficientPool {
                required,
                found: pool.len(),
            });
        }

        let mut drawn: Vec<&str> = pool.iter().map(AsRef::as_ref).collect();
        shuffle(&mut drawn, rng);
        drawn.truncate(required);

        let mut spaces: Vec<Space> = drawn
            .into_iter()
            .map(|label| Space::from_label(label, 0))
            .collect();
        spaces.insert(FREE_SPACE_INDEX, Space::free_space(0));
        for (i, space) in spaces.iter_mut().enumerate() {
            space.order = (i + 1) as u32;
        }

        if let Some(dup) = duplicate_id(&spaces) {
            return Err(CardError::DuplicateId(dup));
        }

        Ok(Card {
            spaces,
            subscribers: Vec::new(),
        })
    }

    /// Rebuilds a card from spaces that came back from a persisted or
    /// remote mirror. Accepts partial lists (a read-only viewer renders
    /// whatever arrived) but never duplicate ids. Spaces are stable-sorted
    /// by their stored `order`, then renumbered 1..=n so gappy or tied
    /// orders converge to the canonical sequence.
    pub fn rehydrate(mut spaces: Vec<Space>) -> Result<Card, CardError> {
        if let Some(dup) = duplicate_id(&spaces) {
            return Err(CardError::DuplicateId(dup));
        }

        spaces.sort_by_key(|space| space.order);
        for (i, space) in spaces.iter_mut().enumerate() {
            space.order = (i + 1) as u32;
        }

        Ok(Card {
            spaces,
            subscribers: Vec::new(),
        })
    }

    /// Deserializes a card from bytes.
    pub fn deserialize(bts: &Vec<u8>) -> Self {
        bcs::from_bytes(bts).unwrap()
    }

    /// Serializes the card to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        bcs::to_bytes(self).unwrap()
    }

    /// Registers a synchronous observer. Subscribers run in registration
    /// order, on the same thread of control as the mutation, and always
    /// after the mutation has been applied.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&CardEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn notify(&mut self, event: CardEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    /// Toggles the space with the given id and returns its new checked
    /// state. The locked free space is forced to stay checked, without
    /// error. An id not on this card is an `InvalidToggleTarget`.
    pub fn toggle(&mut self, id: &str) -> Result<bool, CardError> {
        let space = self
            .spaces
            .iter_mut()
            .find(|space| space.id == id)
            .ok_or_else(|| CardError::InvalidToggleTarget(id.to_string()))?;

        // The free space can never be unchecked by user action.
        space.checked = if space.locked { true } else { !space.checked };

        let checked = space.checked;
        let event = CardEvent::SpaceChanged {
            id: space.id.to_string(),
            checked,
        };
        self.notify(event);

        Ok(checked)
    }

    /// Whether any winning combination is fully checked. Pure and cheap
    /// enough to run after every toggle. Indices beyond the end of a
    /// partial, rehydrated card count as unchecked.
    pub fn has_won(&self) -> bool {
        WINNING_COMBOS.iter().any(|combo| {
            combo
                .iter()
                .all(|&i| self.spaces.get(i).is_some_and(|space| space.checked))
        })
    }

    /// Replaces the whole layout with a freshly dealt one and notifies
    /// subscribers. A failed deal (bad pool) leaves the current card
    /// exactly as it was.
    pub fn reset<S: AsRef<str>>(
        &mut self,
        pool: &[S],
        rng: &mut impl Rng,
    ) -> Result<(), CardError> {
        let fresh = Card::deal(pool, rng)?;
        self.spaces = fresh.spaces;
        self.notify(CardEvent::Reset);
        Ok(())
    }

    /// Read access to a single space by id.
    pub fn space(&self, id: &str) -> Option<&Space> {
        self.spaces.iter().find(|space| space.id == id)
    }
}

// --- Utility Functions ---

/// In-place Fisher-Yates shuffle: walk from the back, swapping each element
/// with a uniformly chosen one at or before it. Every permutation is equally
/// likely given a uniform source, and a seeded source makes it reproducible.
pub fn shuffle<T>(xs: &mut [T], rng: &mut impl Rng) {
    for m in (1..xs.len()).rev() {
        let i = rng.random_range(0..=m);
        xs.swap(m, i);
    }
}

/// First id that appears more than once, if any.
fn duplicate_id(spaces: &[Space]) -> Option<String> {
    spaces
        .iter()
        .map(|space| space.id.as_str())
        .duplicates()
        .next()
        .map(str::to_string)
}
