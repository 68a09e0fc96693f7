/// Demo: run the sample sales voice notes through the parser and print a report
use anyhow::{Context, Result};
use crm_voice_notes::{logging, Config, ParseOutcome, ParsedResult, VoiceNoteParser};

struct Sample {
    name: &'static str,
    transcript: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        name: "Initial Sales Call",
        transcript: "I had a call with Sarah Johnson from TechStart Inc. She's interested in our enterprise solution. \
            We discussed their current pain points with data management and how our product could help. \
            Key points include their need for better analytics, integration with their existing CRM, and scalability for their growing team. \
            Next steps are to send a product demo link and schedule a follow-up meeting next Tuesday. \
            The potential deal value is around $75,000.",
    },
    Sample {
        name: "Product Demo",
        transcript: "Just finished a demo with Michael Chen from Global Logistics. \
            I showed them our warehouse management features and real-time tracking capabilities. \
            They seemed particularly interested in the automated reporting and the mobile app. \
            We need to prepare a custom quote for their 5 warehouses and get pricing approval from their finance team. \
            Follow up in two weeks. This deal is worth about $120,000.",
    },
    Sample {
        name: "Deal Closing",
        transcript: "Great news! I just closed the deal with Emily Rodriguez at Innovative Solutions. \
            We signed the contract for their annual subscription. \
            The final value is $45,000 with a 20% discount applied. \
            They'll start onboarding next Monday.",
    },
    Sample {
        name: "Minimal Information",
        transcript: "Met with John from Acme. Discussed pricing.",
    },
];

fn print_list(title: &str, items: &[String]) {
    println!("   {}:", title);
    for item in items {
        println!("     - {}", item);
    }
}

fn print_result(result: &ParsedResult, threshold: f64) {
    println!("   👤 Customer: {} ({})", result.customer.name, result.customer.company);
    if !result.customer.email.is_empty() {
        println!("      Email: {}", result.customer.email);
    }
    if !result.customer.phone.is_empty() {
        println!("      Phone: {}", result.customer.phone);
    }

    println!("   💬 Interaction: {}", result.interaction.kind);
    println!("      Summary: {}", result.interaction.summary);
    print_list("Key points", &result.interaction.key_points);
    print_list("Next steps", &result.interaction.next_steps);
    if let Some(date) = &result.interaction.follow_up_date {
        println!("   📅 Follow-up: {}", date);
    }

    match &result.deal {
        Some(deal) => {
            println!("   💰 {}: value '{}', stage {}", deal.name, deal.value, deal.stage);
            if let Some(close) = &deal.close_date {
                println!("      Close date: {}", close);
            }
        }
        None => println!("   💰 No deal detected"),
    }

    let marker = if result.confidence >= threshold { "✅" } else { "⚠️ " };
    println!("   {} Confidence: {:.2} (threshold {:.2})", marker, result.confidence, threshold);
    if !result.flags.is_empty() {
        println!("   🚩 Flags:");
        for flag in &result.flags {
            println!("     - {}", flag);
        }
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = Config::load(Config::default_path()).context("Failed to load config")?;
    logging::init_logging(&config.logging);

    let parser = VoiceNoteParser::new(config.parser.clone()).context("Failed to build voice note parser")?;
    let threshold = config.parser.confidence_threshold;

    println!("\n🎙️  CRM VOICE NOTE PARSER DEMO");
    println!("{}", "=".repeat(60));

    let mut failures = 0;
    for (index, sample) in SAMPLES.iter().enumerate() {
        println!("\n📄 SAMPLE {}: {}", index + 1, sample.name);
        println!("{}", "-".repeat(60));
        println!("   \"{}\"", sample.transcript);
        println!();

        match parser.parse(sample.transcript) {
            ParseOutcome::Success(result) => print_result(&result, threshold),
            ParseOutcome::Failure(errors) => {
                failures += 1;
                println!("   ❌ Validation failed:");
                for error in errors {
                    println!("     - {}", error);
                }
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Parsed {} samples, {} failed validation", SAMPLES.len(), failures);
    Ok(())
}
