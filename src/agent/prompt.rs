//! Prompt templates for the route advisor.

use crate::tools::ToolRegistry;

/// Build the route planning instruction for one trip.
///
/// The four values are embedded verbatim.
pub fn build_route_prompt(
    location: &str,
    destination: &str,
    vehicle_type: &str,
    departure_time: &str,
) -> String {
    format!(
        r#"I need you to act as a smart route planning assistant. I will provide you with my current location, my desired destination, the type of vehicle I'll be using, and my planned departure time. Your task is to analyze the standard Google Maps route for this journey and then compare it with a "smart" route that takes into account live traffic conditions, the specific vehicle type, and the given time.

Here's the input you will use:

Current Location,
Destination,
Vehicle Type,
Departure Time,

Based on this input, please provide the following output:

Traffic Congestion:

You look up the traffic from Google Maps.

Recommended Route:

A one-line recommendation (e.g., "Avoid [Street X] due to heavy congestion, take [Street Y] instead." or "Stay on the main highway for the fastest journey.").

Smart Route:

The fastest route based on live traffic, including:

Estimated travel time in minutes

Estimated distance in km

Time saved by using the smart route compared to the standard Google Maps route in minutes

Distance saved/increased by using the smart route compared to the standard Google Maps route in km

Decision Reasoning:

Bullet points explaining how you made this decision, considering:

Live traffic data for the relevant roads.

Impact of vehicle type on route recommendations (e.g., a bicycle might avoid main roads, a truck might need to avoid low bridges).

Influence of the departure time on expected traffic patterns.

Example of how I expect the output to look (do not generate this unless I provide input):

Traffic Congestion: Moderate
Recommended Route: Avoid Boulevard Périphérique due to peak hour traffic, consider taking Avenue des Champs-Élysées.
Smart Route:
x min
x km
(Win x min, x km less)
Decision Reasoning:

Live traffic indicates significant slowdowns on Boulevard Périphérique at 8:00 AM.

For a car, Avenue des Champs-Élysées, while longer in distance, has a more fluid traffic flow at this time.

The departure time of 8:00 AM aligns with typical morning rush hour, necessitating an alternative route.

Here is the data I will provide to you:

Current Location: {location}

Destination: {destination}

Vehicle Type: {vehicle_type}

Departure Time: {departure_time}
"#
    )
}

/// System prompt for the tool loop, listing the registered lookups.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a route planning assistant with access to live lookups.

## Your Tools

{tool_descriptions}

## Rules

1. **Look things up** - Prefer tool results over assumptions when a lookup can answer the question.

2. **One argument** - Every tool takes a single `input` string. Traffic ignores it.

3. **Tolerate failures** - A tool may answer with an error message. Note it and continue with what you know.

4. **Finish** - When you have enough information, answer in the format the user asked for, without a tool call."#
    )
}
