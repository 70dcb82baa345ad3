// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::DEFAULT_REGION;
use std::fmt::{Debug, Formatter};
use volcsign_core::utils::Redact;
use volcsign_core::SigningCredential;

/// Credential that holds the access_key_id, secret_access_key and region.
#[derive(Default, Clone)]
pub struct Credential {
    /// Access key id (AK) for volcengine services.
    pub access_key_id: String,
    /// Secret access key (SK) for volcengine services.
    pub secret_access_key: String,
    /// Region the signature is scoped to.
    pub region: String,
}

impl Credential {
    /// Create a new credential. `region` is stored as given.
    pub fn new(access_key_id: &str, secret_access_key: &str, region: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            region: region.to_string(),
        }
    }

    /// Region used for the credential scope.
    ///
    /// An empty region falls back to `cn-beijing`.
    pub fn region(&self) -> &str {
        if self.region.is_empty() {
            DEFAULT_REGION
        } else {
            &self.region
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("region", &self.region)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_validity() {
        assert!(Credential::new("ak", "sk", "cn-beijing").is_valid());
        assert!(!Credential::new("", "sk", "cn-beijing").is_valid());
        assert!(!Credential::new("ak", "", "cn-beijing").is_valid());
        assert!(!Credential::default().is_valid());
    }

    #[test]
    fn test_region_fallback() {
        let cred = Credential::new("ak", "sk", "");
        assert_eq!(cred.region, "");
        assert_eq!(cred.region(), "cn-beijing");
        assert_eq!(Credential::new("ak", "sk", "cn-shanghai").region(), "cn-shanghai");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = Credential::new("AKLTexampleAccessKey", "secretExampleValue", "cn-beijing");
        let s = format!("{cred:?}");
        assert!(!s.contains("secretExampleValue"));
        assert!(!s.contains("AKLTexampleAccessKey"));
        assert!(s.contains("cn-beijing"));
    }
}
