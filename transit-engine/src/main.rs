use transit_engine::api::{Engine, QueryOptions};
use transit_engine::resolve::Anchor;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(origin_raw), Some(destination_raw)) = (args.next(), args.next()) else {
        eprintln!("Usage: transit-engine <origin> <destination> [transport-type]");
        eprintln!("  endpoints are stop names or lat,lon pairs");
        eprintln!("  e.g. transit-engine \"El Crucero\" \"Zona Hotelera\"");
        eprintln!("       transit-engine \"21.1576,-86.8269\" \"Playa Delfines\" bus");
        std::process::exit(2);
    };

    let origin = Anchor::parse(&origin_raw).expect("invalid origin coordinate");
    let destination = Anchor::parse(&destination_raw).expect("invalid destination coordinate");
    let options = QueryOptions {
        transport_type: args.next(),
        ..QueryOptions::default()
    };

    let (engine, report) = Engine::bundled().expect("failed to load bundled catalog");
    eprintln!(
        "Loaded {} stops, {} routes ({} dangling references)",
        report.stops,
        report.routes,
        report.dangling.len()
    );

    match engine.find_itineraries(&origin, &destination, &options) {
        Ok(itineraries) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&itineraries).expect("serializable results")
            );
        }
        Err(err) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&err.body()).expect("serializable error")
            );
            std::process::exit(1);
        }
    }
}
