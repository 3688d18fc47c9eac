#![allow(missing_docs, clippy::unwrap_used)]
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use zmanim::{FixedRestDays, Location, Zman, Zmanim, ZmanimConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let location = Location::new(32.08707, 34.88747, "Asia/Jerusalem")?
        .named("Petah Tikva")
        .with_elevation(54.0);

    let today = Utc::now().with_timezone(&location.timezone()).date_naive();
    // Pesach and Shavuot 5779, for illustration
    let festivals = FixedRestDays::new().festivals([
        NaiveDate::from_ymd_opt(2019, 4, 20).unwrap(),
        NaiveDate::from_ymd_opt(2019, 4, 26).unwrap(),
        NaiveDate::from_ymd_opt(2019, 6, 9).unwrap(),
    ]);

    let zmanim = Zmanim::builder(location)
        .config(ZmanimConfig::from_toml_str("candle_lighting_offset = 30")?)
        .calendar(festivals)
        .build(today)?;

    println!("Zmanim Example - {}", zmanim.location().name().unwrap_or("unnamed"));
    println!(
        "Location: {:.5}°N, {:.5}°E",
        zmanim.location().latitude(),
        zmanim.location().longitude()
    );
    println!("Date: {}", zmanim.date().format("%B %d, %Y"));
    println!("Solver: {}", zmanim.strategy());
    println!("{:=<60}", "");

    println!("{zmanim}");
    println!();

    match zmanim.zmanim()?.get(&Zman::ThreeStars) {
        Some(three_stars) => println!("Three stars: {}", three_stars.format("%H:%M:%S %Z")),
        None => println!("Three stars: N/A"),
    }

    let show = |label: &str, time: Option<chrono::DateTime<Tz>>| match time {
        Some(time) => println!("{label}: {}", time.format("%H:%M:%S %Z")),
        None => println!("{label}: N/A"),
    };
    show("Candle lighting", zmanim.candle_lighting()?);
    show("Havdalah", zmanim.havdalah()?);
    println!();

    println!(
        "Issur melacha in effect at {}: {}",
        zmanim.local_instant().format("%H:%M"),
        zmanim.issur_melacha_in_effect()?
    );
    Ok(())
}
