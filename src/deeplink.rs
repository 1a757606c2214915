// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subsumio Trust - Deep-Link Interceptor Support
 * redirect_uri extraction for the desktop shell's navigation guard
 *
 * The desktop shell hands over the custom-scheme URL it intercepted;
 * the redirect_uri may sit in the query string or, for OAuth implicit
 * flows, in the hash fragment.
 *
 * Copyright 2025 Subsumio GmbH
 */

use url::Url;

use crate::policy::RedirectPolicy;

/// Pull a `redirect_uri` parameter out of a deep-link URL.
///
/// The query string wins over the fragment when both carry one.
pub fn extract_redirect_uri(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;

    if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "redirect_uri") {
        return Some(value.into_owned());
    }

    let fragment = url.fragment()?;
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "redirect_uri")
        .map(|(_, value)| value.into_owned())
}

/// Navigation decision for an intercepted deep link.
///
/// No extractable `redirect_uri` is a deny; the shell stays on the
/// current page rather than guessing a destination.
pub fn allow_deeplink_navigation(policy: &RedirectPolicy, raw: &str) -> bool {
    match extract_redirect_uri(raw) {
        Some(target) => policy.is_allowed_redirect_target(&target),
        None => false,
    }
}
