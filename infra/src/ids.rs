use std::cmp::{self, Ordering};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{self, AtomicU64};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use data_encoding::BASE64URL_NOPAD;
use err_derive::Error;
use hex_slice::AsHex;
use rand::distributions::{Distribution, Standard};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// An opaque identifier for some `T`.
///
/// The first eight bytes hold a big-endian nanosecond timestamp, the
/// remainder is random. Identifiers from the same `IdGen` therefore order by
/// creation.
pub struct Id<T> {
    val: [u8; 16],
    phantom: PhantomData<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error(display = "Invalid prefix; expected {:?}", _0)]
    InvalidPrefix(&'static str),
    #[error(display = "Unparseable Id")]
    Unparseable,
}

pub trait Entity {
    const PREFIX: &'static str;
}

/// Hands out identifiers whose timestamps strictly increase, even when
/// shared between threads or when the wall clock stalls.
#[derive(Debug, Default)]
pub struct IdGen {
    last: AtomicU64,
}

const DIVIDER: &str = "-";
const STAMP_LEN: usize = 8;

impl<T> Id<T> {
    fn from_parts(stamp: u64, random: u64) -> Self {
        let mut val = [0u8; 16];
        val[..STAMP_LEN].copy_from_slice(&stamp.to_be_bytes());
        val[STAMP_LEN..].copy_from_slice(&random.to_be_bytes());
        Id {
            val,
            phantom: PhantomData,
        }
    }

    fn stamp(&self) -> u64 {
        let mut buf = [0u8; STAMP_LEN];
        buf.copy_from_slice(&self.val[..STAMP_LEN]);
        u64::from_be_bytes(buf)
    }

    pub fn timestamp(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_nanos(self.stamp())
    }
}

impl IdGen {
    pub fn new() -> Self {
        IdGen::default()
    }

    pub fn generate<T>(&self) -> Id<T> {
        let stamp = self.next_stamp();
        Id::from_parts(stamp, rand::random())
    }

    fn next_stamp(&self) -> u64 {
        let now = now_nanos();
        let mut prev = self.last.load(atomic::Ordering::Relaxed);
        loop {
            let next = cmp::max(now, prev.saturating_add(1));
            match self.last.compare_exchange_weak(
                prev,
                next,
                atomic::Ordering::Relaxed,
                atomic::Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(seen) => prev = seen,
            }
        }
    }
}

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

impl<T> Distribution<Id<T>> for Standard {
    fn sample<R: ?Sized + rand::Rng>(&self, rng: &mut R) -> Id<T> {
        let val = rng.gen();
        Id {
            val,
            phantom: PhantomData,
        }
    }
}

impl<T: Entity> fmt::Display for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "{}{}{}",
            T::PREFIX,
            DIVIDER,
            BASE64URL_NOPAD.encode(&self.val)
        )
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Id")
            .field("val", &format_args!("{:x}", self.val.as_hex()))
            .finish()
    }
}

impl<T: Entity> std::str::FromStr for Id<T> {
    type Err = IdParseError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if !src.starts_with(T::PREFIX) {
            return Err(IdParseError::InvalidPrefix(T::PREFIX));
        }
        let remainder = &src[T::PREFIX.len()..];
        if !remainder.starts_with(DIVIDER) {
            return Err(IdParseError::Unparseable);
        }
        let b64 = &remainder[DIVIDER.len()..];

        let bytes = BASE64URL_NOPAD
            .decode(b64.as_bytes())
            .map_err(|_| IdParseError::Unparseable)?;
        let mut id = Id {
            val: [0u8; 16],
            phantom: PhantomData,
        };
        if bytes.len() != id.val.len() {
            return Err(IdParseError::Unparseable);
        }
        id.val.copy_from_slice(&bytes);
        Ok(id)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.val.hash(state)
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.val.cmp(&other.val)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T: Entity> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, T: Entity> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdStrVisitor<T>(PhantomData<T>);
        impl<'vi, T: Entity> de::Visitor<'vi> for IdStrVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "an Id string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Id<T>, E> {
                value.parse::<Id<T>>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IdStrVisitor(PhantomData))
    }
}
