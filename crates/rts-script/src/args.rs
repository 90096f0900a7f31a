//! Parameter decoding
//!
//! Each helper turns one raw token into a typed value. Errors are plain
//! messages; the compiler attaches the file, line and text.

use rts_core::{seconds_to_ticks, Appearance, ConditionCheck};

pub(crate) type ArgResult<T> = std::result::Result<T, String>;

pub(crate) fn int(token: &str) -> ArgResult<i32> {
    token
        .parse::<i32>()
        .map_err(|_| format!("expected an integer, got `{token}`"))
}

pub(crate) fn unsigned(token: &str) -> ArgResult<u32> {
    token
        .parse::<u32>()
        .map_err(|_| format!("expected a non-negative integer, got `{token}`"))
}

pub(crate) fn float(token: &str) -> ArgResult<f32> {
    token
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("expected a number, got `{token}`"))
}

/// Ticks from `35`, `35T` or `1.5S`
pub(crate) fn time(token: &str) -> ArgResult<i32> {
    let upper = token.to_ascii_uppercase();
    let ticks = if let Some(seconds) = upper.strip_suffix('S') {
        seconds_to_ticks(float(seconds).map_err(|_| format!("bad time `{token}`"))?)
    } else {
        let ticks = upper.strip_suffix('T').unwrap_or(&upper);
        int(ticks).map_err(|_| format!("bad time `{token}`"))?
    };
    if ticks < 0 {
        return Err(format!("time cannot be negative: `{token}`"));
    }
    Ok(ticks)
}

/// A percentage (`50%` or `50`) as a fraction in [0, 1]
pub(crate) fn percent(token: &str) -> ArgResult<f32> {
    let number = token.strip_suffix('%').unwrap_or(token);
    let value = float(number).map_err(|_| format!("expected a percentage, got `{token}`"))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("percentage out of range: `{token}`"));
    }
    Ok(value / 100.0)
}

pub(crate) fn boolean(token: &str) -> ArgResult<bool> {
    match token.to_ascii_uppercase().as_str() {
        "TRUE" | "YES" | "ON" | "1" => Ok(true),
        "FALSE" | "NO" | "OFF" | "0" => Ok(false),
        _ => Err(format!("expected TRUE or FALSE, got `{token}`")),
    }
}

/// Strip surrounding quotes, if any
pub(crate) fn unquote(token: &str) -> String {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
        .to_string()
}

/// Split `KEY=value` into an upper-cased key and the raw value
pub(crate) fn keyword(token: &str) -> Option<(String, &str)> {
    if token.starts_with('"') {
        return None;
    }
    let (key, value) = token.split_once('=')?;
    Some((key.to_ascii_uppercase(), value))
}

/// `label` or `label:offset`
pub(crate) fn label_offset(token: &str) -> ArgResult<(String, u32)> {
    match token.split_once(':') {
        Some((label, offset)) => Ok((label.to_ascii_uppercase(), unsigned(offset)?)),
        None => Ok((token.to_ascii_uppercase(), 0)),
    }
}

/// `WHEN_APPEAR` text such as `1-3:sp:coop`
///
/// Skills or modes left unmentioned mean all of them.
pub(crate) fn appearance(token: &str) -> ArgResult<Appearance> {
    let mut skills = 0u16;
    let mut modes = 0u16;

    for part in token.split(|c: char| c == ':' || c == '+') {
        let part = part.trim().to_ascii_uppercase();
        match part.as_str() {
            "" => {}
            "SP" | "SINGLE" => modes |= Appearance::SINGLE,
            "COOP" => modes |= Appearance::COOP,
            "DM" | "DEATHMATCH" => modes |= Appearance::DEATHMATCH,
            _ => {
                let (low, high) = match part.split_once('-') {
                    Some((low, high)) => (skill(low)?, skill(high)?),
                    None => (skill(&part)?, skill(&part)?),
                };
                if low > high {
                    return Err(format!("bad skill range `{part}`"));
                }
                for s in low..=high {
                    skills |= Appearance::skill_bit(s);
                }
            }
        }
    }

    if skills == 0 {
        skills = Appearance::SKILL_MASK;
    }
    if modes == 0 {
        modes = Appearance::MODE_MASK;
    }
    Ok(Appearance(skills | modes))
}

fn skill(text: &str) -> ArgResult<u8> {
    match text.parse::<u8>() {
        Ok(s) if (1..=5).contains(&s) => Ok(s),
        _ => Err(format!("bad skill `{text}` (expected 1-5)")),
    }
}

/// `NAME`, `!NAME` or `NAME(amount)`
pub(crate) fn condition(token: &str) -> ArgResult<ConditionCheck> {
    let (negate, rest) = match token.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => match token.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("NOT_") => (true, &token[4..]),
            _ => (false, token),
        },
    };

    let (name, amount) = match rest.split_once('(') {
        Some((name, tail)) => {
            let inner = tail
                .strip_suffix(')')
                .ok_or_else(|| format!("bad condition `{token}`"))?
                .trim();
            let inner = inner.strip_suffix('%').unwrap_or(inner);
            (name, Some(float(inner)?))
        }
        None => (rest, None),
    };

    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("bad condition `{token}`"));
    }
    Ok(ConditionCheck {
        name: name.to_ascii_uppercase(),
        amount,
        negate,
    })
}
