// Copyright (C) 2017 1aim GmbH
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// The preferred domestic carrier selection code for a phone number.
///
/// This is the code that needs to be dialled, in some countries, ahead of
/// the national significant number to select a carrier when calling
/// domestically (e.g. the "12" in a Brazilian long-distance call). It is
/// recorded as an opaque digit string, not parsed further.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Hash, Debug)]
pub struct Carrier(pub(crate) String);

impl<T: Into<String>> From<T> for Carrier {
    fn from(value: T) -> Carrier {
        Carrier(value.into())
    }
}

impl Deref for Carrier {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Carrier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::Carrier;

    #[test]
    fn from_str() {
        let carrier: Carrier = "12".into();
        assert_eq!("12", carrier.as_ref());
        assert_eq!("12", carrier.to_string());
    }
}
